//! # Domain Types
//!
//! Core domain types used throughout Emporium.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      User       │   │      Cart       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  username       │   │  user_id  ◄─────┼── 1:1 │
//! │  │  price (Money)  │   │  password_hash  │   │  items [Item]   │       │
//! │  │  description    │   │  cart ──────────┼──►│  total (derived)│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    NewOrder     │──►│   UserOrder     │   (directory assigns id     │
//! │  │  (unsaved)      │   │  (immutable)    │    and created_at on save)  │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity as Repetition
//! A cart holds one entry per unit. Two units of "Round" are two `Item`
//! entries, not one entry with a count. This keeps the total a plain sum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A catalog item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier.
    pub id: i64,

    /// Display name. Not unique.
    pub name: String,

    /// Unit price, non-negative.
    pub price: Money,

    /// Free-form description.
    pub description: String,
}

impl Item {
    /// Creates an item.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
    ) -> Self {
        Item {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A user's shopping cart.
///
/// ## Invariants
/// - `total` always equals the sum of `items[*].price`
/// - `items` and `total` are private; every mutation recomputes the total
/// - Entry order is insertion order (kept for display, irrelevant to the total)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    id: i64,
    user_id: i64,
    items: Vec<Item>,
    total: Money,
}

impl Cart {
    /// Creates an empty cart owned by `user_id`.
    pub fn empty(id: i64, user_id: i64) -> Self {
        Cart {
            id,
            user_id,
            items: Vec::new(),
            total: Money::zero(),
        }
    }

    /// Rebuilds a cart from stored entries. The total is derived, never loaded.
    pub fn with_entries(id: i64, user_id: i64, items: Vec<Item>) -> Self {
        let mut cart = Cart {
            id,
            user_id,
            items,
            total: Money::zero(),
        };
        cart.recompute_total();
        cart
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Back-reference to the owning user.
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Current entries, one per unit of quantity.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Number of entries (total units).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries referring to `item_id`.
    pub fn count_of(&self, item_id: i64) -> usize {
        self.items.iter().filter(|entry| entry.id == item_id).count()
    }

    /// Sum of entry prices, computed from scratch.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(|entry| entry.price).sum()
    }

    /// Appends `quantity` copies of `item`.
    pub fn add_units(&mut self, item: &Item, quantity: u32) {
        self.items
            .extend(std::iter::repeat(item).take(quantity as usize).cloned());
        self.recompute_total();
    }

    /// Removes up to `quantity` occurrences of `item_id`, earliest first.
    ///
    /// Returns how many entries were actually removed; asking for more than
    /// are present removes all of them.
    pub fn remove_units(&mut self, item_id: i64, quantity: u32) -> usize {
        let before = self.items.len();
        let mut remaining = quantity;

        self.items.retain(|entry| {
            if remaining > 0 && entry.id == item_id {
                remaining -= 1;
                false
            } else {
                true
            }
        });

        self.recompute_total();
        before - self.items.len()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total = self.computed_total();
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user and the cart they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    /// Unique login name.
    pub username: String,

    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// The user's one and only cart.
    pub cart: Cart,
}

// =============================================================================
// Orders
// =============================================================================

/// An order snapshot that has not been persisted yet.
///
/// ## Snapshot Pattern
/// `items` is an owned copy of the cart entries at the moment of submission,
/// so later cart mutations never reach the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    user_id: i64,
    username: String,
    items: Vec<Item>,
    total: Money,
}

impl NewOrder {
    /// Freezes the user's current cart.
    pub fn snapshot(user: &User) -> Self {
        NewOrder {
            user_id: user.id,
            username: user.username.clone(),
            items: user.cart.items().to_vec(),
            total: user.cart.total(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Seals the snapshot with the id and timestamp assigned by storage.
    pub fn into_order(self, id: i64, created_at: DateTime<Utc>) -> UserOrder {
        UserOrder {
            id,
            user_id: self.user_id,
            username: self.username,
            items: self.items,
            total: self.total,
            created_at,
        }
    }
}

/// A submitted order. Immutable: fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrder {
    id: i64,
    user_id: i64,
    username: String,
    items: Vec<Item>,
    total: Money,
    created_at: DateTime<Utc>,
}

impl UserOrder {
    /// Rebuilds an order from storage.
    pub fn restore(
        id: i64,
        user_id: i64,
        username: impl Into<String>,
        items: Vec<Item>,
        total: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        UserOrder {
            id,
            user_id,
            username: username.into(),
            items,
            total,
            created_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Total at submission time.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Item {
        Item::new(1, "Round", Money::from_major(10), "Round item")
    }

    fn square() -> Item {
        Item::new(2, "Square", Money::from_major(20), "Square item")
    }

    #[test]
    fn test_with_entries_derives_total() {
        let cart = Cart::with_entries(1, 1, vec![round(), square()]);
        assert_eq!(cart.total(), Money::from_major(30));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_add_units_appends_one_entry_per_unit() {
        let mut cart = Cart::empty(1, 1);
        cart.add_units(&round(), 3);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.count_of(1), 3);
        assert_eq!(cart.total(), Money::from_major(30));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::with_entries(1, 1, vec![round(), square()]);
        cart.add_units(&round(), 1);

        let ids: Vec<i64> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(cart.total(), Money::from_major(40));
    }

    #[test]
    fn test_remove_units_removes_earliest_occurrences() {
        let mut cart = Cart::with_entries(1, 1, vec![round(), square(), round()]);
        let removed = cart.remove_units(1, 1);

        assert_eq!(removed, 1);
        let ids: Vec<i64> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(cart.total(), Money::from_major(30));
    }

    #[test]
    fn test_remove_more_than_present_removes_all() {
        let mut cart = Cart::with_entries(1, 1, vec![round(), square(), round()]);
        let removed = cart.remove_units(1, 10);

        assert_eq!(removed, 2);
        assert_eq!(cart.count_of(1), 0);
        assert_eq!(cart.total(), Money::from_major(20));
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::with_entries(1, 1, vec![square()]);
        assert_eq!(cart.remove_units(1, 2), 0);
        assert_eq!(cart.total(), Money::from_major(20));
    }

    #[test]
    fn test_zero_quantity_changes_nothing() {
        let mut cart = Cart::with_entries(1, 1, vec![round()]);
        cart.add_units(&square(), 0);
        cart.remove_units(1, 0);
        assert_eq!(cart.items(), &[round()]);
    }

    #[test]
    fn test_clear_resets_total() {
        let mut cart = Cart::with_entries(1, 1, vec![round(), square()]);
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_snapshot_is_decoupled_from_cart() {
        let mut user = User {
            id: 7,
            username: "root".to_string(),
            password_hash: "hash".to_string(),
            cart: Cart::with_entries(1, 7, vec![round(), square()]),
        };

        let order = NewOrder::snapshot(&user).into_order(1, Utc::now());
        user.cart.add_units(&square(), 2);

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total(), Money::from_major(30));
        assert_eq!(order.username(), "root");
    }

    #[test]
    fn test_user_json_hides_password_hash() {
        let user = User {
            id: 1,
            username: "root".to_string(),
            password_hash: "secret-hash".to_string(),
            cart: Cart::empty(1, 1),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["cart"]["total"], "0");
        assert_eq!(json["cart"]["userId"], 1);
    }
}
