//! # Cart Engine
//!
//! Adds and removes units of catalog items in a user's cart.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart("root", item 1, qty 1)                                     │
//! │                                                                         │
//! │  0. quantity ≤ MAX_UNITS_PER_ADD     ← adds only, else Validation       │
//! │  1. lock("root")                     ← per-user, see locks.rs           │
//! │  2. find_user_by_username("root")    ← NotFound? stop, nothing saved    │
//! │  3. find_item_by_id(1)               ← NotFound? stop, nothing saved    │
//! │  4. cart.add_units(item, 1)          ← total recomputed from entries    │
//! │  5. save_cart(cart)                  ← returned cart is the saved one   │
//! │  6. unlock                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::directory::Directory;
use crate::error::{CoreError, CoreResult};
use crate::locks::UserLocks;
use crate::types::{Cart, Item, User};
use crate::validation::validate_add_quantity;

/// Cart mutations over a [`Directory`].
#[derive(Clone)]
pub struct CartEngine {
    directory: Arc<dyn Directory>,
    locks: UserLocks,
}

impl CartEngine {
    /// Creates an engine. Share `locks` with the [`OrderEngine`](crate::order::OrderEngine).
    pub fn new(directory: Arc<dyn Directory>, locks: UserLocks) -> Self {
        CartEngine { directory, locks }
    }

    /// Appends `quantity` units of `item_id` to the user's cart.
    ///
    /// ## Errors
    /// - `Validation` if `quantity` exceeds [`MAX_UNITS_PER_ADD`](crate::MAX_UNITS_PER_ADD)
    /// - `NotFound` if the user or the item does not exist
    /// - `Directory` if storage fails
    pub async fn add_to_cart(&self, username: &str, item_id: i64, quantity: u32) -> CoreResult<Cart> {
        debug!(%username, item_id, quantity, "Adding to cart");

        if let Err(e) = validate_add_quantity(quantity) {
            warn!(%username, item_id, quantity, "Rejected cart add");
            return Err(e.into());
        }

        let _guard = self.locks.lock(username).await;
        let (mut user, item) = self.resolve(username, item_id).await?;

        user.cart.add_units(&item, quantity);
        let saved = self.directory.save_cart(&user.cart).await?;

        info!(%username, item_id, quantity, total = %saved.total(), "Added to cart");
        Ok(saved)
    }

    /// Removes up to `quantity` units of `item_id` from the user's cart.
    ///
    /// Removing more units than the cart holds removes all of them.
    ///
    /// ## Errors
    /// - `NotFound` if the user or the item does not exist
    /// - `Directory` if storage fails
    pub async fn remove_from_cart(
        &self,
        username: &str,
        item_id: i64,
        quantity: u32,
    ) -> CoreResult<Cart> {
        debug!(%username, item_id, quantity, "Removing from cart");

        let _guard = self.locks.lock(username).await;
        let (mut user, item) = self.resolve(username, item_id).await?;

        let removed = user.cart.remove_units(item.id, quantity);
        let saved = self.directory.save_cart(&user.cart).await?;

        info!(%username, item_id, removed, total = %saved.total(), "Removed from cart");
        Ok(saved)
    }

    async fn resolve(&self, username: &str, item_id: i64) -> CoreResult<(User, Item)> {
        let Some(user) = self.directory.find_user_by_username(username).await? else {
            warn!(%username, "Cart update for unknown user");
            return Err(CoreError::not_found("User", username));
        };

        let Some(item) = self.directory.find_item_by_id(item_id).await? else {
            warn!(%username, item_id, "Cart update for unknown item");
            return Err(CoreError::not_found("Item", item_id));
        };

        Ok((user, item))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
