//! # Order Engine
//!
//! Freezes a user's cart into an immutable order and lists past orders.
//!
//! ## Submission
//! ```text
//!   Cart [Round, Square] total 30
//!        │
//!        │ NewOrder::snapshot (owned copy of entries + total)
//!        ▼
//!   save_order ──► UserOrder #1 [Round, Square] total 30   (never changes again)
//!        │
//!        ▼
//!   SubmitPolicy::RetainCart → cart left as is (default)
//!   SubmitPolicy::ClearCart  → cart emptied and saved
//! ```

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::directory::Directory;
use crate::error::{CoreError, CoreResult};
use crate::locks::UserLocks;
use crate::types::{NewOrder, User, UserOrder};

/// What happens to the cart once its order is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// The cart keeps its entries.
    #[default]
    RetainCart,

    /// The cart is emptied after the order is persisted.
    ClearCart,
}

impl SubmitPolicy {
    /// Maps a "clear cart on submit" flag to a policy.
    pub fn from_clear_flag(clear: bool) -> Self {
        if clear {
            SubmitPolicy::ClearCart
        } else {
            SubmitPolicy::RetainCart
        }
    }
}

/// Order submission and history over a [`Directory`].
#[derive(Clone)]
pub struct OrderEngine {
    directory: Arc<dyn Directory>,
    locks: UserLocks,
    policy: SubmitPolicy,
}

impl OrderEngine {
    pub fn new(directory: Arc<dyn Directory>, locks: UserLocks, policy: SubmitPolicy) -> Self {
        OrderEngine {
            directory,
            locks,
            policy,
        }
    }

    /// Creates an order from the user's current cart.
    ///
    /// An empty cart still produces an order with a zero total.
    ///
    /// ## Errors
    /// - `NotFound` if the user does not exist
    /// - `Directory` if storage fails
    pub async fn submit_order(&self, username: &str) -> CoreResult<UserOrder> {
        debug!(%username, policy = ?self.policy, "Submitting order");

        let _guard = self.locks.lock(username).await;
        let mut user = self.resolve_user(username).await?;

        let order = self.directory.save_order(&NewOrder::snapshot(&user)).await?;

        // The order is already stored; a failed clear still surfaces as an
        // error and a retry would place a second order.
        if self.policy == SubmitPolicy::ClearCart {
            user.cart.clear();
            if let Err(e) = self.directory.save_cart(&user.cart).await {
                error!(%username, order_id = order.id(), error = %e, "Order saved but cart not cleared");
                return Err(e.into());
            }
        }

        info!(
            %username,
            order_id = order.id(),
            items = order.items().len(),
            total = %order.total(),
            "Order submitted"
        );
        Ok(order)
    }

    /// Orders placed by the user, oldest first.
    ///
    /// ## Errors
    /// - `NotFound` if the user does not exist **or** has no orders
    pub async fn list_orders_for_user(&self, username: &str) -> CoreResult<Vec<UserOrder>> {
        let user = self.resolve_user(username).await?;
        let orders = self.directory.find_orders_by_user(&user).await?;

        if orders.is_empty() {
            warn!(%username, "No order history");
            return Err(CoreError::not_found("Orders", username));
        }

        debug!(%username, count = orders.len(), "Order history");
        Ok(orders)
    }

    async fn resolve_user(&self, username: &str) -> CoreResult<User> {
        match self.directory.find_user_by_username(username).await? {
            Some(user) => Ok(user),
            None => {
                warn!(%username, "Order request for unknown user");
                Err(CoreError::not_found("User", username))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartEngine;
    use crate::memory::InMemoryDirectory;
    use crate::money::Money;
    use crate::error::DirectoryError;
    use crate::types::{Cart, Item};

    struct Fixture {
        directory: Arc<InMemoryDirectory>,
        carts: CartEngine,
        orders: OrderEngine,
        round: Item,
    }

    async fn fixture(policy: SubmitPolicy) -> Fixture {
        let directory = Arc::new(InMemoryDirectory::new());
        let round = directory.add_item("Round", Money::from_major(10), "Round item").await;
        let square = directory.add_item("Square", Money::from_major(20), "Square item").await;

        let mut user = directory.create_user("root", "hash").await.unwrap();
        user.cart.add_units(&round, 1);
        user.cart.add_units(&square, 1);
        directory.save_cart(&user.cart).await.unwrap();

        let locks = UserLocks::new();
        Fixture {
            carts: CartEngine::new(directory.clone(), locks.clone()),
            orders: OrderEngine::new(directory.clone(), locks, policy),
            directory,
            round,
        }
    }

    #[tokio::test]
    async fn test_submit_order() {
        let f = fixture(SubmitPolicy::default()).await;

        let order = f.orders.submit_order("root").await.unwrap();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total(), Money::from_major(30));
        assert_eq!(order.username(), "root");
    }

    #[tokio::test]
    async fn test_submit_retains_cart_by_default() {
        let f = fixture(SubmitPolicy::RetainCart).await;
        f.orders.submit_order("root").await.unwrap();

        let user = f.directory.find_user_by_username("root").await.unwrap().unwrap();
        assert_eq!(user.cart.len(), 2);
        assert_eq!(user.cart.total(), Money::from_major(30));
    }

    #[tokio::test]
    async fn test_clear_cart_policy_empties_cart() {
        let f = fixture(SubmitPolicy::ClearCart).await;
        let order = f.orders.submit_order("root").await.unwrap();

        let user = f.directory.find_user_by_username("root").await.unwrap().unwrap();
        assert!(user.cart.is_empty());
        assert!(user.cart.total().is_zero());
        assert_eq!(order.total(), Money::from_major(30));
    }

    #[tokio::test]
    async fn test_order_is_isolated_from_later_cart_changes() {
        let f = fixture(SubmitPolicy::default()).await;
        let submitted = f.orders.submit_order("root").await.unwrap();

        f.carts.add_to_cart("root", f.round.id, 4).await.unwrap();

        let history = f.orders.list_orders_for_user("root").await.unwrap();
        assert_eq!(history, vec![submitted]);
        assert_eq!(history[0].total(), Money::from_major(30));
        assert_eq!(history[0].items().len(), 2);
    }

    #[tokio::test]
    async fn test_history_lists_orders_oldest_first() {
        let f = fixture(SubmitPolicy::default()).await;
        let first = f.orders.submit_order("root").await.unwrap();
        f.carts.add_to_cart("root", f.round.id, 1).await.unwrap();
        let second = f.orders.submit_order("root").await.unwrap();

        let history = f.orders.list_orders_for_user("root").await.unwrap();
        assert_eq!(history, vec![first, second]);
        assert_eq!(history[1].total(), Money::from_major(40));
    }

    #[tokio::test]
    async fn test_submit_empty_cart_gives_zero_total() {
        let f = fixture(SubmitPolicy::default()).await;
        f.directory.create_user("guest", "hash").await.unwrap();

        let order = f.orders.submit_order("guest").await.unwrap();
        assert!(order.items().is_empty());
        assert!(order.total().is_zero());
    }

    #[tokio::test]
    async fn test_unknown_user_and_empty_history_are_both_not_found() {
        let f = fixture(SubmitPolicy::default()).await;

        assert!(f.orders.submit_order("ghost").await.unwrap_err().is_not_found());
        assert!(f.orders.list_orders_for_user("ghost").await.unwrap_err().is_not_found());
        assert!(f.orders.list_orders_for_user("root").await.unwrap_err().is_not_found());
    }

    /// Delegates everything except `save_cart`, which always fails.
    struct CartSavesFail(Arc<InMemoryDirectory>);

    #[async_trait::async_trait]
    impl Directory for CartSavesFail {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
            self.0.find_user_by_username(username).await
        }
        async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError> {
            self.0.find_user_by_id(id).await
        }
        async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, DirectoryError> {
            self.0.create_user(username, password_hash).await
        }
        async fn find_item_by_id(&self, id: i64) -> Result<Option<Item>, DirectoryError> {
            self.0.find_item_by_id(id).await
        }
        async fn list_items(&self) -> Result<Vec<Item>, DirectoryError> {
            self.0.list_items().await
        }
        async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>, DirectoryError> {
            self.0.find_items_by_name(name).await
        }
        async fn save_cart(&self, _cart: &Cart) -> Result<Cart, DirectoryError> {
            let io = std::io::Error::new(std::io::ErrorKind::Other, "cart table locked");
            Err(DirectoryError::backend(io))
        }
        async fn save_order(&self, order: &NewOrder) -> Result<UserOrder, DirectoryError> {
            self.0.save_order(order).await
        }
        async fn find_orders_by_user(&self, user: &User) -> Result<Vec<UserOrder>, DirectoryError> {
            self.0.find_orders_by_user(user).await
        }
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_order_and_cart() {
        let f = fixture(SubmitPolicy::ClearCart).await;
        let orders = OrderEngine::new(
            Arc::new(CartSavesFail(f.directory.clone())),
            UserLocks::new(),
            SubmitPolicy::ClearCart,
        );

        let err = orders.submit_order("root").await.unwrap_err();
        assert!(matches!(err, CoreError::Directory(DirectoryError::Backend(_))));

        // the order went through; the cart still holds its entries
        let history = f.orders.list_orders_for_user("root").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total(), Money::from_major(30));
        let user = f.directory.find_user_by_username("root").await.unwrap().unwrap();
        assert_eq!(user.cart.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_users_leave_no_lock_slots() {
        let f = fixture(SubmitPolicy::default()).await;

        for i in 0..1_000 {
            assert!(f.orders.submit_order(&format!("ghost-{i}")).await.unwrap_err().is_not_found());
        }

        assert!(f.orders.locks.is_empty());
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(SubmitPolicy::from_clear_flag(true), SubmitPolicy::ClearCart);
        assert_eq!(SubmitPolicy::from_clear_flag(false), SubmitPolicy::RetainCart);
        assert_eq!(SubmitPolicy::default(), SubmitPolicy::RetainCart);
    }
}
