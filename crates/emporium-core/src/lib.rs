//! # emporium-core: Cart and Order Domain Logic
//!
//! This crate is the heart of Emporium. It owns the data model, the
//! `Money` type, and the two engines that mutate state:
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Emporium Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HTTP handlers (apps/api)                        │   │
//! │  │   /api/cart/addToCart   /api/order/submit/{username}  ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ emporium-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │ Item User │  │   Money   │  │CartEngine │  │OrderEngine│  │   │
//! │  │   │Cart Order │  │ (decimal) │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └─────┬─────┘  │   │
//! │  │                                       └──────┬───────┘        │   │
//! │  │                                  ┌───────────▼──────────┐     │   │
//! │  │                                  │ Directory (trait)    │     │   │
//! │  │                                  └───────────┬──────────┘     │   │
//! │  └──────────────────────────────────────────────┼────────────────┘   │
//! │                                                 │                    │
//! │                          emporium-db (SQLite) ◄─┴─► InMemoryDirectory│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, User, Cart, UserOrder)
//! - [`money`] - Exact decimal `Money`
//! - [`error`] - Domain error types
//! - [`validation`] - Request rules (passwords, quantities)
//! - [`directory`] - The persistence port
//! - [`cart`] - Cart Engine (add / remove)
//! - [`order`] - Order Engine (submit / history)
//! - [`locks`] - Per-user mutual exclusion
//! - [`memory`] - In-memory `Directory` implementation
//!
//! ## Design Principles
//!
//! 1. **Recompute, never track**: a cart's total is rebuilt from its entries on every mutation
//! 2. **Decimal Money**: prices and totals never touch binary floating point
//! 3. **Explicit Port**: engines receive their `Directory` at construction
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use emporium_core::{Cart, Item, Money};
//!
//! let round = Item::new(1, "Round", Money::from_major(10), "Round item");
//! let square = Item::new(2, "Square", Money::from_major(20), "Square item");
//!
//! let mut cart = Cart::with_entries(1, 1, vec![round.clone(), square]);
//! cart.add_units(&round, 1);
//!
//! assert_eq!(cart.total(), Money::from_major(40));
//! ```

pub mod cart;
pub mod directory;
pub mod error;
pub mod locks;
pub mod memory;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::CartEngine;
pub use directory::Directory;
pub use error::{CoreError, CoreResult, DirectoryError, ValidationError};
pub use locks::UserLocks;
pub use memory::InMemoryDirectory;
pub use money::Money;
pub use order::{OrderEngine, SubmitPolicy};
pub use types::*;

/// Minimum password length accepted at account creation.
pub const MIN_PASSWORD_LENGTH: usize = 7;

/// Most units a single add-to-cart call may append.
pub const MAX_UNITS_PER_ADD: u32 = 1000;
