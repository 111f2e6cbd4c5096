//! Order endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use emporium_core::UserOrder;

use crate::error::ApiResult;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/order/submit/{username}", post(submit))
        .route("/api/order/history/{username}", get(history))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserOrder>> {
    Ok(Json(state.orders.submit_order(&username).await?))
}

/// 404 covers both an unknown user and a user with no orders.
pub async fn history(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<UserOrder>>> {
    Ok(Json(state.orders.list_orders_for_user(&username).await?))
}
