//! # Validation Module
//!
//! Request rules checked before any state is touched.
//!
//! Account creation has two: a minimum password length and a matching
//! confirmation. Cart additions cap the units appended per call.
//!
//! ## Usage
//! ```rust
//! use emporium_core::validation::validate_new_password;
//!
//! assert!(validate_new_password("rootPassword", "rootPassword").is_ok());
//! assert!(validate_new_password("short", "short").is_err());
//! assert!(validate_new_password("rootPassword", "otherPassword").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_UNITS_PER_ADD, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a new password and its confirmation.
///
/// ## Rules
/// - At least `MIN_PASSWORD_LENGTH` (7) characters
/// - Must equal the confirmation exactly
pub fn validate_new_password(password: &str, confirm: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if password != confirm {
        return Err(ValidationError::Mismatch {
            field: "confirmPassword".to_string(),
            other: "password".to_string(),
        });
    }

    Ok(())
}

/// Validates the quantity of an add-to-cart call.
///
/// Every unit becomes its own cart entry (and row), so a single call is
/// capped at `MAX_UNITS_PER_ADD`.
pub fn validate_add_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity > MAX_UNITS_PER_ADD {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: u64::from(MAX_UNITS_PER_ADD),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
