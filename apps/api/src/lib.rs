//! # Emporium API
//!
//! HTTP/JSON surface over the cart and order engines.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/cart/addToCart {"username":"root","itemId":1,"quantity":2}   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer (tower-http) ── span per request                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes::cart::add_to_cart ── State<AppState>                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartEngine::add_to_cart ──► Arc<dyn Directory> (SQLite or memory)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  200 Cart JSON  |  ApiError → 404 / 500 JSON                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod accounts;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use emporium_core::{CartEngine, Directory, OrderEngine, SubmitPolicy, UserLocks};
use emporium_db::Database;

use crate::accounts::Accounts;

pub use routes::router;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub carts: CartEngine,
    pub orders: OrderEngine,
    pub accounts: Accounts,

    /// Present when backed by SQLite; used by `/health`.
    pub database: Option<Database>,
}

impl AppState {
    /// Builds the state over any directory. Both engines share one lock registry.
    pub fn new(directory: Arc<dyn Directory>, policy: SubmitPolicy) -> Self {
        let locks = UserLocks::new();

        AppState {
            carts: CartEngine::new(directory.clone(), locks.clone()),
            orders: OrderEngine::new(directory.clone(), locks, policy),
            accounts: Accounts::new(directory.clone()),
            directory,
            database: None,
        }
    }

    /// Builds the state over a SQLite database.
    pub fn with_database(database: Database, policy: SubmitPolicy) -> Self {
        let mut state = AppState::new(Arc::new(database.clone()), policy);
        state.database = Some(database);
        state
    }
}
