//! # Accounts
//!
//! User creation, login and lookup.
//!
//! ## Password Storage
//! ```text
//! create: "rootPassword" ──argon2 + random salt──► "$argon2id$v=19$m=...$<salt>$<hash>"
//! login:  "rootPassword" ──verify against PHC string──► ok / 401
//! ```
//! The PHC string carries its own salt and parameters, so nothing else is
//! stored alongside it.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use emporium_core::validation::validate_new_password;
use emporium_core::{Directory, User};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};

/// Body of `POST /api/user/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Body of `POST /api/user/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            ApiError::internal("Failed to hash password")
        })?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string.
///
/// An unparsable hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Account operations over a [`Directory`].
#[derive(Clone)]
pub struct Accounts {
    directory: Arc<dyn Directory>,
}

impl Accounts {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Accounts { directory }
    }

    /// Registers a user with an empty cart.
    ///
    /// ## Errors
    /// - 400 if the password is shorter than 7 characters or the confirmation differs
    /// - 409 if the username is taken
    pub async fn create_user(&self, request: &CreateUserRequest) -> ApiResult<User> {
        if let Err(e) = validate_new_password(&request.password, &request.confirm_password) {
            warn!(username = %request.username, reason = %e, "Rejected user creation");
            return Err(e.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .directory
            .create_user(&request.username, &password_hash)
            .await?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Checks credentials. No session or token is issued.
    ///
    /// ## Errors
    /// - 404 if the user does not exist
    /// - 401 if the password is wrong
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let user = self.find_by_username(&request.username).await?;

        if !verify_password(&request.password, &user.password_hash) {
            warn!(username = %request.username, "Login failed: wrong password");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        info!(username = %user.username, "Login succeeded");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> ApiResult<User> {
        self.directory
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("User", id))
    }

    pub async fn find_by_username(&self, username: &str) -> ApiResult<User> {
        match self.directory.find_user_by_username(username).await? {
            Some(user) => Ok(user),
            None => {
                warn!(%username, "Unknown user");
                Err(ApiError::not_found("User", username))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
