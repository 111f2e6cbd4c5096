//! # Order Repository
//!
//! Orders and their entries. Entries copy the item's name, price and
//! description at submission, so an order reads the same forever.

use chrono::{DateTime, Utc};
use emporium_core::{NewOrder, UserOrder};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::item::{into_items, parse_money, ItemRecord};
use crate::error::DbResult;

#[derive(Debug, Clone, sqlx::FromRow)]
struct OrderRecord {
    id: i64,
    user_id: i64,
    username: String,
    total: String,
    created_at: DateTime<Utc>,
}

/// Repository for submitted orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists an order and its entries in one transaction.
    pub async fn insert(&self, order: &NewOrder) -> DbResult<UserOrder> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query("INSERT INTO orders (user_id, total, created_at) VALUES (?1, ?2, ?3)")
            .bind(order.user_id())
            .bind(order.total().amount().to_string())
            .bind(created_at)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for (position, item) in order.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_entries (order_id, position, item_id, name, price, description)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(order_id)
            .bind(position as i64)
            .bind(item.id)
            .bind(&item.name)
            .bind(item.price.amount().to_string())
            .bind(&item.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(order_id, user_id = order.user_id(), total = %order.total(), "Inserted order");
        Ok(order.clone().into_order(order_id, created_at))
    }

    /// Orders placed by `user_id`, oldest first.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<UserOrder>> {
        let records = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT o.id, o.user_id, u.username, o.total, o.created_at
            FROM orders o
            INNER JOIN users u ON u.id = o.user_id
            WHERE o.user_id = ?1
            ORDER BY o.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id, count = records.len(), "Listed orders");

        let mut orders = Vec::with_capacity(records.len());
        for record in records {
            let items = self.entries(record.id).await?;
            let total = parse_money("total", &record.total)?;
            orders.push(UserOrder::restore(
                record.id,
                record.user_id,
                record.username,
                items,
                total,
                record.created_at,
            ));
        }

        Ok(orders)
    }

    async fn entries(&self, order_id: i64) -> DbResult<Vec<emporium_core::Item>> {
        let records = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT item_id AS id, name, price, description
            FROM order_entries
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        into_items(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
