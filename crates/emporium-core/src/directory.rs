//! # Directory
//!
//! The persistence port. Engines never see storage directly; they are handed
//! an `Arc<dyn Directory>` when constructed.
//!
//! ## Implementations
//! ```text
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │ emporium_db::Database        │      │ memory::InMemoryDirectory    │
//! │ SQLite pool + transactions   │      │ HashMaps behind an RwLock    │
//! └──────────────┬───────────────┘      └───────────────┬──────────────┘
//!                └───────────────┬──────────────────────┘
//!                                ▼
//!                     impl Directory (Send + Sync)
//! ```
//!
//! Lookups that miss return `Ok(None)` or an empty `Vec`; deciding whether a
//! miss is an error is the caller's job.

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::types::{Cart, Item, NewOrder, User, UserOrder};

/// Keyed lookup and save per entity type.
#[async_trait]
pub trait Directory: Send + Sync {
    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Looks up a user (and their cart) by username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError>;

    /// Creates a user together with an empty cart.
    ///
    /// Fails with [`DirectoryError::Conflict`] if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, DirectoryError>;

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    async fn find_item_by_id(&self, id: i64) -> Result<Option<Item>, DirectoryError>;

    async fn list_items(&self) -> Result<Vec<Item>, DirectoryError>;

    /// Exact name match.
    async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>, DirectoryError>;

    // -------------------------------------------------------------------------
    // Carts and orders
    // -------------------------------------------------------------------------

    /// Replaces the stored entries of `cart` and returns the stored cart.
    async fn save_cart(&self, cart: &Cart) -> Result<Cart, DirectoryError>;

    /// Persists an order, assigning its id and timestamp.
    async fn save_order(&self, order: &NewOrder) -> Result<UserOrder, DirectoryError>;

    /// Orders placed by `user`, oldest first.
    async fn find_orders_by_user(&self, user: &User) -> Result<Vec<UserOrder>, DirectoryError>;
}
