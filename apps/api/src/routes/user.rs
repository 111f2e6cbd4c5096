//! User endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use emporium_core::User;

use crate::accounts::{CreateUserRequest, LoginRequest};
use crate::error::ApiResult;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/id/{id}", get(find_by_id))
        .route("/api/user/{username}", get(find_by_username))
        .route("/api/user/create", post(create))
        .route("/api/user/login", post(login))
}

pub async fn find_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    Ok(Json(state.accounts.find_by_id(id).await?))
}

pub async fn find_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.accounts.find_by_username(&username).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.accounts.create_user(&request).await?))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.accounts.login(&request).await?))
}
