//! Cart endpoints.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use emporium_core::Cart;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;

/// Body shared by add and remove.
///
/// `quantity` is unsigned, so a negative value is rejected by the JSON extractor.
/// Adds above `MAX_UNITS_PER_ADD` come back as 400.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCartRequest {
    pub username: String,
    pub item_id: i64,
    pub quantity: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cart/addToCart", post(add_to_cart))
        .route("/api/cart/removeFromCart", post(remove_from_cart))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(request): Json<ModifyCartRequest>,
) -> ApiResult<Json<Cart>> {
    let cart = state
        .carts
        .add_to_cart(&request.username, request.item_id, request.quantity)
        .await?;
    Ok(Json(cart))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Json(request): Json<ModifyCartRequest>,
) -> ApiResult<Json<Cart>> {
    let cart = state
        .carts
        .remove_from_cart(&request.username, request.item_id, request.quantity)
        .await?;
    Ok(Json(cart))
}
