//! # In-Memory Directory
//!
//! A [`Directory`] held entirely in process memory. Used by engine and HTTP
//! tests, and handy for demos that should not touch disk.
//!
//! Ids are assigned from per-entity counters starting at 1. A whole store
//! sits behind one `RwLock`, so each call is atomic on its own.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::directory::Directory;
use crate::error::DirectoryError;
use crate::money::Money;
use crate::types::{Cart, Item, NewOrder, User, UserOrder};

/// Backend failures of the in-memory store.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("store is unavailable")]
    Unavailable,

    #[error("cart {0} has no owner")]
    OrphanCart(i64),
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    usernames: HashMap<String, i64>,
    items: BTreeMap<i64, Item>,
    orders: Vec<UserOrder>,
    next_user_id: i64,
    next_cart_id: i64,
    next_item_id: i64,
    next_order_id: i64,
}

impl Store {
    fn next(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// In-memory [`Directory`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    store: RwLock<Store>,
    unavailable: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog item and returns it with its assigned id.
    pub async fn add_item(
        &self,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
    ) -> Item {
        let mut store = self.store.write().await;
        let id = Store::next(&mut store.next_item_id);
        let item = Item::new(id, name, price, description);
        store.items.insert(id, item.clone());
        item
    }

    /// Makes every subsequent call fail with a backend error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DirectoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DirectoryError::backend(MemoryError::Unavailable));
        }
        Ok(())
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(store
            .usernames
            .get(username)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError> {
        self.check_available()?;
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, DirectoryError> {
        self.check_available()?;
        let mut store = self.store.write().await;

        if store.usernames.contains_key(username) {
            return Err(DirectoryError::conflict("username", username));
        }

        let id = Store::next(&mut store.next_user_id);
        let cart_id = Store::next(&mut store.next_cart_id);
        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            cart: Cart::empty(cart_id, id),
        };

        store.usernames.insert(user.username.clone(), id);
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_item_by_id(&self, id: i64) -> Result<Option<Item>, DirectoryError> {
        self.check_available()?;
        Ok(self.store.read().await.items.get(&id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<Item>, DirectoryError> {
        self.check_available()?;
        Ok(self.store.read().await.items.values().cloned().collect())
    }

    async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>, DirectoryError> {
        self.check_available()?;
        Ok(self
            .store
            .read()
            .await
            .items
            .values()
            .filter(|item| item.name == name)
            .cloned()
            .collect())
    }

    async fn save_cart(&self, cart: &Cart) -> Result<Cart, DirectoryError> {
        self.check_available()?;
        let mut store = self.store.write().await;

        let owner = store
            .users
            .get_mut(&cart.user_id())
            .filter(|user| user.cart.id() == cart.id())
            .ok_or_else(|| DirectoryError::backend(MemoryError::OrphanCart(cart.id())))?;

        owner.cart = cart.clone();
        Ok(owner.cart.clone())
    }

    async fn save_order(&self, order: &NewOrder) -> Result<UserOrder, DirectoryError> {
        self.check_available()?;
        let mut store = self.store.write().await;

        let id = Store::next(&mut store.next_order_id);
        let saved = order.clone().into_order(id, Utc::now());
        store.orders.push(saved.clone());
        Ok(saved)
    }

    async fn find_orders_by_user(&self, user: &User) -> Result<Vec<UserOrder>, DirectoryError> {
        self.check_available()?;
        Ok(self
            .store
            .read()
            .await
            .orders
            .iter()
            .filter(|order| order.user_id() == user.id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
