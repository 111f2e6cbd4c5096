//! # Routes
//!
//! | Method | Path                            | Handler                   |
//! |--------|---------------------------------|---------------------------|
//! | GET    | `/api/user/id/{id}`             | [`user::find_by_id`]      |
//! | GET    | `/api/user/{username}`          | [`user::find_by_username`]|
//! | POST   | `/api/user/create`              | [`user::create`]          |
//! | POST   | `/api/user/login`               | [`user::login`]           |
//! | GET    | `/api/item`                     | [`item::list`]            |
//! | GET    | `/api/item/{id}`                | [`item::find_by_id`]      |
//! | GET    | `/api/item/name/{name}`         | [`item::find_by_name`]    |
//! | POST   | `/api/cart/addToCart`           | [`cart::add_to_cart`]     |
//! | POST   | `/api/cart/removeFromCart`      | [`cart::remove_from_cart`]|
//! | POST   | `/api/order/submit/{username}`  | [`order::submit`]         |
//! | GET    | `/api/order/history/{username}` | [`order::history`]        |
//! | GET    | `/health`                       | [`health`]                |

pub mod cart;
pub mod item;
pub mod order;
pub mod user;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(user::routes())
        .merge(item::routes())
        .merge(cart::routes())
        .merge(order::routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness plus a database round trip when SQLite backs the state.
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if let Some(db) = &state.database {
        if !db.health_check().await {
            warn!("Health check failed: database unavailable");
            return (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable");
        }
    }

    (StatusCode::OK, "OK")
}
