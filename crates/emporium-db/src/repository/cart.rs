//! # Cart Repository
//!
//! Loads and replaces cart entries.
//!
//! ## Save = Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(cart)                                                             │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    SELECT user_id FROM carts WHERE id = ?      ← must exist and match   │
//! │    DELETE FROM cart_entries WHERE cart_id = ?                           │
//! │    INSERT cart_entries (cart_id, 0, item)                               │
//! │    INSERT cart_entries (cart_id, 1, item) ...  ← one row per unit       │
//! │  COMMIT                                        ← all or nothing         │
//! │                                                                         │
//! │  then reload entries → Cart::with_entries (total re-derived)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use emporium_core::{Cart, Item};
use sqlx::SqlitePool;
use tracing::debug;

use super::item::{into_items, ItemRecord};
use crate::error::{DbError, DbResult};

/// Repository for carts and their entries.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads the cart owned by `user_id`.
    pub async fn get_for_user(&self, user_id: i64) -> DbResult<Option<Cart>> {
        let cart_id: Option<i64> = sqlx::query_scalar("SELECT id FROM carts WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match cart_id {
            Some(cart_id) => Ok(Some(self.load(cart_id, user_id).await?)),
            None => Ok(None),
        }
    }

    /// Builds a cart from its stored entries.
    pub(crate) async fn load(&self, cart_id: i64, user_id: i64) -> DbResult<Cart> {
        let items = self.entries(cart_id).await?;
        Ok(Cart::with_entries(cart_id, user_id, items))
    }

    /// Entries of a cart in insertion order.
    async fn entries(&self, cart_id: i64) -> DbResult<Vec<Item>> {
        let records = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT i.id, i.name, i.price, i.description
            FROM cart_entries e
            INNER JOIN items i ON i.id = e.item_id
            WHERE e.cart_id = ?1
            ORDER BY e.position
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        into_items(records)
    }

    /// Replaces the stored entries with the cart's current entries.
    ///
    /// ## Errors
    /// - `NotFound` if the cart row does not exist or belongs to another user
    /// - `ForeignKeyViolation` if an entry references an unknown item
    pub async fn save(&self, cart: &Cart) -> DbResult<Cart> {
        debug!(cart_id = cart.id(), entries = cart.len(), "Saving cart");

        let mut tx = self.pool.begin().await?;

        let owner: Option<i64> = sqlx::query_scalar("SELECT user_id FROM carts WHERE id = ?1")
            .bind(cart.id())
            .fetch_optional(&mut *tx)
            .await?;

        if owner != Some(cart.user_id()) {
            return Err(DbError::not_found("Cart", cart.id()));
        }

        sqlx::query("DELETE FROM cart_entries WHERE cart_id = ?1")
            .bind(cart.id())
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items().iter().enumerate() {
            sqlx::query("INSERT INTO cart_entries (cart_id, position, item_id) VALUES (?1, ?2, ?3)")
                .bind(cart.id())
                .bind(position as i64)
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.load(cart.id(), cart.user_id()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use emporium_core::Money;

    #[tokio::test]
    async fn test_save_replaces_entries_in_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let round = db.items().insert("Round", Money::from_major(10), "").await.unwrap();
        let square = db.items().insert("Square", Money::from_major(20), "").await.unwrap();
        let mut user = db.users().create("root", "hash").await.unwrap();

        user.cart.add_units(&round, 1);
        user.cart.add_units(&square, 1);
        user.cart.add_units(&round, 1);
        let saved = db.carts().save(&user.cart).await.unwrap();

        let ids: Vec<i64> = saved.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![round.id, square.id, round.id]);
        assert_eq!(saved.total(), Money::from_major(40));

        user.cart.remove_units(round.id, 1);
        let saved = db.carts().save(&user.cart).await.unwrap();
        assert_eq!(saved.total(), Money::from_major(30));

        let reloaded = db.carts().get_for_user(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded, saved);
    }

    #[tokio::test]
    async fn test_save_unknown_cart_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.carts().save(&Cart::empty(42, 7)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let round = db.items().insert("Round", Money::from_major(10), "").await.unwrap();
        let mut user = db.users().create("root", "hash").await.unwrap();

        user.cart.add_units(&round, 1);
        db.carts().save(&user.cart).await.unwrap();

        let ghost = emporium_core::Item::new(999, "Ghost", Money::from_major(1), "");
        user.cart.add_units(&ghost, 1);
        let err = db.carts().save(&user.cart).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let stored = db.carts().get_for_user(user.id).await.unwrap().unwrap();
        assert_eq!(stored.items(), &[round]);
    }
}
