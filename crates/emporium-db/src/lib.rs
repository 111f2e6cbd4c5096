//! # emporium-db: SQLite Directory for Emporium
//!
//! This crate provides database access for Emporium. It uses SQLite with
//! sqlx for async operations and implements the `Directory` trait from
//! emporium-core.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Emporium Data Flow                               │
//! │                                                                         │
//! │  CartEngine / OrderEngine (emporium-core)                              │
//! │       │  Arc<dyn Directory>                                            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   emporium-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ItemRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ UserRepo      │    │ 001_initial_ │  │   │
//! │  │   │ impl Directory│    │ CartRepo      │    │   schema.sql │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (EMPORIUM_DB_PATH, default ./emporium.db)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`directory`] - `Directory` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use emporium_core::{CartEngine, UserLocks};
//! use emporium_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("emporium.db")).await?;
//! let carts = CartEngine::new(Arc::new(db), UserLocks::new());
//! carts.add_to_cart("root", 1, 2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod directory;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
pub use repository::user::UserRepository;
