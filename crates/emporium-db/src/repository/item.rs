//! # Item Repository
//!
//! Catalog reads plus the insert used by the seed binary.
//!
//! Prices are stored as TEXT decimals and parsed back into `Money`; a row
//! whose price does not parse is reported as `DbError::Corrupt` rather than
//! silently becoming zero.

use emporium_core::{Item, Money};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Row shape shared by every query that returns catalog items.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ItemRecord {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ItemRecord {
    pub(crate) fn into_item(self) -> DbResult<Item> {
        let price = parse_money("price", &self.price)?;
        Ok(Item::new(self.id, self.name, price, self.description))
    }
}

/// Parses a stored decimal column.
pub(crate) fn parse_money(column: &'static str, raw: &str) -> DbResult<Money> {
    raw.parse().map_err(|_| DbError::Corrupt {
        column,
        value: raw.to_string(),
    })
}

pub(crate) fn into_items(records: Vec<ItemRecord>) -> DbResult<Vec<Item>> {
    records.into_iter().map(ItemRecord::into_item).collect()
}

/// Repository for catalog items.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        debug!(id, "Fetching item");

        let record = sqlx::query_as::<_, ItemRecord>(
            "SELECT id, name, price, description FROM items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(ItemRecord::into_item).transpose()
    }

    /// Lists the whole catalog ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let records = sqlx::query_as::<_, ItemRecord>(
            "SELECT id, name, price, description FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed items");
        into_items(records)
    }

    /// Items whose name equals `name` exactly.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<Item>> {
        debug!(%name, "Fetching items by name");

        let records = sqlx::query_as::<_, ItemRecord>(
            "SELECT id, name, price, description FROM items WHERE name = ?1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        into_items(records)
    }

    /// Inserts an item and returns it with its assigned id.
    pub async fn insert(&self, name: &str, price: Money, description: &str) -> DbResult<Item> {
        let result = sqlx::query("INSERT INTO items (name, price, description) VALUES (?1, ?2, ?3)")
            .bind(name)
            .bind(price.amount().to_string())
            .bind(description)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, %name, "Inserted item");
        Ok(Item::new(id, name, price, description))
    }

    /// Counts catalog items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
