//! Catalog endpoints. Read-only.
//!
//! An empty catalog and a name with no matches are both reported as 404.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use emporium_core::Item;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/item", get(list))
        .route("/api/item/{id}", get(find_by_id))
        .route("/api/item/name/{name}", get(find_by_name))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = state.directory.list_items().await?;

    if items.is_empty() {
        warn!("Catalog is empty");
        return Err(ApiError::not_found("Items", "catalog is empty"));
    }

    Ok(Json(items))
}

pub async fn find_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Item>> {
    state
        .directory
        .find_item_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Item", id))
}

pub async fn find_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = state.directory.find_items_by_name(&name).await?;

    if items.is_empty() {
        warn!(%name, "No items with that name");
        return Err(ApiError::not_found("Item", name));
    }

    Ok(Json(items))
}
