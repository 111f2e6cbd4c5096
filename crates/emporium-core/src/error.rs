//! # Error Types
//!
//! Domain-specific error types for emporium-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  emporium-core errors (this file)                                      │
//! │  ├── CoreError        - Engine results (NotFound / Validation / ...)   │
//! │  ├── DirectoryError   - What a Directory implementation may fail with  │
//! │  └── ValidationError  - Request rule failures                          │
//! │                                                                         │
//! │  emporium-db errors (separate crate)                                   │
//! │  └── DbError          - Converted into DirectoryError::Backend         │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What clients see (status + JSON)               │
//! │                                                                         │
//! │  Flow: DbError → DirectoryError → CoreError → ApiError → Client        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the Cart and Order engines.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lookup missed.
    ///
    /// ## When This Occurs
    /// - Username is not registered
    /// - Item id is not in the catalog
    /// - Order history is empty (reported the same as an unknown user)
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// The request broke a rule before anything was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The directory failed. Passed through untouched.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and key.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// True for lookup misses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}

// =============================================================================
// Directory Error
// =============================================================================

/// Failure reported by a [`Directory`](crate::directory::Directory).
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A unique key is already taken (e.g. username).
    #[error("{field} '{value}' already exists")]
    Conflict { field: String, value: String },

    /// Storage failure; the source is the backend's own error.
    #[error("directory backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Creates a Conflict error.
    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        DirectoryError::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Wraps any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DirectoryError::Backend(Box::new(err))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is above its limit.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: u64 },

    /// Two fields that must agree do not.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found("User", "ghost");
        assert_eq!(err.to_string(), "User not found: ghost");
        assert!(err.is_not_found());

        let err = CoreError::not_found("Item", 3);
        assert_eq!(err.to_string(), "Item not found: 3");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 7,
        };
        assert_eq!(err.to_string(), "password must be at least 7 characters");

        let err = ValidationError::Mismatch {
            field: "confirmPassword".to_string(),
            other: "password".to_string(),
        };
        assert_eq!(err.to_string(), "confirmPassword does not match password");

        let err = ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: 1000,
        };
        assert_eq!(err.to_string(), "quantity must be at most 1000");
    }

    #[test]
    fn test_directory_error_converts_to_core_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let core: CoreError = DirectoryError::backend(io).into();

        assert!(!core.is_not_found());
        assert!(matches!(core, CoreError::Directory(DirectoryError::Backend(_))));
        assert_eq!(core.to_string(), "directory backend failed: disk on fire");
    }
}
