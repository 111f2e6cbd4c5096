//! # User Repository
//!
//! Users are always loaded together with their cart.

use emporium_core::{Cart, User};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::cart::CartRepository;
use crate::error::{DbError, DbResult};

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    password_hash: String,
    cart_id: i64,
}

const SELECT_USER: &str = r#"
    SELECT u.id, u.username, u.password_hash, c.id AS cart_id
    FROM users u
    INNER JOIN carts c ON c.user_id = u.id
"#;

/// Repository for users.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        debug!(id, "Fetching user");

        let record = sqlx::query_as::<_, UserRecord>(&format!("{SELECT_USER} WHERE u.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        self.load(record).await
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        debug!(%username, "Fetching user");

        let record =
            sqlx::query_as::<_, UserRecord>(&format!("{SELECT_USER} WHERE u.username = ?1"))
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        self.load(record).await
    }

    /// Inserts a user and their empty cart in one transaction.
    ///
    /// ## Errors
    /// - `UniqueViolation` if the username is taken
    pub async fn create(&self, username: &str, password_hash: &str) -> DbResult<User> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?1, ?2)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    DbError::duplicate("username", username)
                }
                other => DbError::from(other),
            })?
            .last_insert_rowid();

        let cart_id = sqlx::query("INSERT INTO carts (user_id) VALUES (?1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        tx.commit().await?;

        info!(user_id, %username, "Created user");
        Ok(User {
            id: user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            cart: Cart::empty(cart_id, user_id),
        })
    }

    async fn load(&self, record: Option<UserRecord>) -> DbResult<Option<User>> {
        let Some(record) = record else {
            return Ok(None);
        };

        let cart = CartRepository::new(self.pool.clone())
            .load(record.cart_id, record.id)
            .await?;

        Ok(Some(User {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            cart,
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
