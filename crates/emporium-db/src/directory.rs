//! # SQLite Directory
//!
//! Implements [`Directory`] for [`Database`] by delegating to the
//! repositories. `DbError` converts into `DirectoryError` on the way out.

use async_trait::async_trait;
use emporium_core::{Cart, Directory, DirectoryError, Item, NewOrder, User, UserOrder};

use crate::pool::Database;

#[async_trait]
impl Directory for Database {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        Ok(self.users().get_by_username(username).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DirectoryError> {
        Ok(self.users().get_by_id(id).await?)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, DirectoryError> {
        Ok(self.users().create(username, password_hash).await?)
    }

    async fn find_item_by_id(&self, id: i64) -> Result<Option<Item>, DirectoryError> {
        Ok(self.items().get_by_id(id).await?)
    }

    async fn list_items(&self) -> Result<Vec<Item>, DirectoryError> {
        Ok(self.items().list().await?)
    }

    async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>, DirectoryError> {
        Ok(self.items().find_by_name(name).await?)
    }

    async fn save_cart(&self, cart: &Cart) -> Result<Cart, DirectoryError> {
        Ok(self.carts().save(cart).await?)
    }

    async fn save_order(&self, order: &NewOrder) -> Result<UserOrder, DirectoryError> {
        Ok(self.orders().insert(order).await?)
    }

    async fn find_orders_by_user(&self, user: &User) -> Result<Vec<UserOrder>, DirectoryError> {
        Ok(self.orders().list_for_user(user.id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use emporium_core::{CartEngine, CoreError, Money, OrderEngine, SubmitPolicy, UserLocks};

    use super::*;
    use crate::DbConfig;

    async fn directory() -> Arc<Database> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.items().insert("Round", Money::from_major(10), "Round item").await.unwrap();
        db.items().insert("Square", Money::from_major(20), "Square item").await.unwrap();
        Arc::new(db)
    }

    #[tokio::test]
    async fn test_engines_over_sqlite() {
        let db = directory().await;
        db.create_user("root", "hash").await.unwrap();

        let locks = UserLocks::new();
        let carts = CartEngine::new(db.clone(), locks.clone());
        let orders = OrderEngine::new(db.clone(), locks, SubmitPolicy::ClearCart);

        carts.add_to_cart("root", 1, 1).await.unwrap();
        let cart = carts.add_to_cart("root", 2, 1).await.unwrap();
        assert_eq!(cart.total(), Money::from_major(30));

        let order = orders.submit_order("root").await.unwrap();
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total(), Money::from_major(30));

        let user = db.find_user_by_username("root").await.unwrap().unwrap();
        assert!(user.cart.is_empty());

        let history = orders.list_orders_for_user("root").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total(), Money::from_major(30));
    }

    #[tokio::test]
    async fn test_duplicate_user_is_conflict() {
        let db = directory().await;
        db.create_user("root", "hash").await.unwrap();

        let err = db.create_user("root", "hash").await.unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_closed_pool_is_backend_failure() {
        let db = directory().await;
        db.create_user("root", "hash").await.unwrap();
        let carts = CartEngine::new(db.clone(), UserLocks::new());

        db.close().await;

        let err = carts.add_to_cart("root", 1, 1).await.unwrap_err();
        assert!(matches!(err, CoreError::Directory(DirectoryError::Backend(_))));
    }
}
