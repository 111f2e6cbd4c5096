//! # Repository Module
//!
//! Database repository implementations for Emporium.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Directory call (emporium-core)                                        │
//! │       │                                                                 │
//! │       │  db.find_user_by_username("root")                              │
//! │       ▼                                                                 │
//! │  UserRepository::get_by_username ──► CartRepository::load              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Catalog reads and inserts
//! - [`UserRepository`](user::UserRepository) - Users with their cart
//! - [`CartRepository`](cart::CartRepository) - Cart entry replacement
//! - [`OrderRepository`](order::OrderRepository) - Order snapshots

pub mod cart;
pub mod item;
pub mod order;
pub mod user;
