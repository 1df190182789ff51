//! # Domain Types
//!
//! Core domain types used throughout Bakery POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Order      │   │    OrderLine    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  status         │   │  order_id       │       │
//! │  │  quantity       │   │  customer_name  │   │  item_id (weak) │       │
//! │  │  unit_price     │   │  total_cents    │   │  item_name snap │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Deduction    │   │   OrderDraft    │  (insert-side shapes        │
//! │  │  ─────────────  │   │   LineDraft     │   without generated ids)    │
//! │  │  item_id, qty   │   │   NewItem       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Customer/cashier names on an order and item name/price on a line are
//! point-in-time receipt copies, NOT live references. Editing or deleting
//! an item later never changes what an existing order says. `item_id` on a
//! line is a weak reference: the item is not required to still exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::status::OrderStatus;

// =============================================================================
// Item (catalog)
// =============================================================================

/// A catalog item the bakery sells.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Unique identifier, assigned by the store on insert.
    pub id: i64,

    /// Display name shown to cashier and on receipts.
    pub name: String,

    /// Optional description for admin screens.
    pub description: Option<String>,

    /// Category the item belongs to (catalog administration owns categories).
    pub category_id: Option<i64>,

    /// On-hand stock. Never negative; the store enforces this with a
    /// CHECK constraint and the conditional decrement.
    pub quantity: i64,

    /// Unit label ("pcs", "kg", "loaf", ...).
    pub unit: String,

    /// Price per unit in cents.
    pub unit_price_cents: i64,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Checks whether the requested quantity could be deducted right now.
    ///
    /// Advisory only: the authoritative check is the conditional decrement
    /// inside the inventory transaction.
    #[inline]
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

/// Insert-side shape for a catalog item (no generated fields yet).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub quantity: i64,
    pub unit: String,
    pub unit_price_cents: i64,
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// `customer_name` and `cashier_name` are denormalized snapshots, not
/// foreign keys; `total_cents` is computed by the caller from the lines at
/// creation time and stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub ordered_at: DateTime<Utc>,
    pub customer_name: String,
    pub cashier_name: String,
    pub total_cents: i64,
    /// One-time latch: set in the same transaction that deducts stock when
    /// the order completes. Guards against double-decrementing.
    pub inventory_applied: bool,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Insert-side shape for an order (id assigned by the store).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDraft {
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub ordered_at: DateTime<Utc>,
    pub customer_name: String,
    pub cashier_name: String,
    pub total_cents: i64,
}

// =============================================================================
// Order Line
// =============================================================================

/// One item entry within an order.
///
/// Uses the snapshot pattern: `item_name` and `unit_price_cents` are frozen
/// at order-creation time. The same `item_id` may appear on more than one
/// line of the same order; no de-duplication is performed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    /// Weak reference to the catalog item; may be dangling after deletes.
    pub item_id: i64,
    /// Item name at order time (frozen).
    pub item_name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price in cents at order time (frozen).
    pub unit_price_cents: i64,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns quantity × unit price as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// Insert-side shape for an order line (order id supplied by the placement
/// transaction once the order row exists).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDraft {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

// =============================================================================
// Deduction
// =============================================================================

/// One entry of an inventory deduction batch.
///
/// A batch is applied all-or-nothing: if any entry cannot be satisfied the
/// whole batch rolls back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Deduction {
    pub item_id: i64,
    pub quantity: i64,
}

impl From<&OrderLine> for Deduction {
    fn from(line: &OrderLine) -> Self {
        Deduction {
            item_id: line.item_id,
            quantity: line.quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> OrderLine {
        OrderLine {
            id: 1,
            order_id: 1,
            item_id: 7,
            item_name: "Croissant".to_string(),
            quantity: 2,
            unit_price_cents: 150,
        }
    }

    #[test]
    fn test_line_total() {
        let line = sample_line();
        assert_eq!(line.line_total().cents(), 300);
    }

    #[test]
    fn test_deduction_from_line() {
        let line = sample_line();
        let d = Deduction::from(&line);
        assert_eq!(d.item_id, 7);
        assert_eq!(d.quantity, 2);
    }

    #[test]
    fn test_has_stock_for_boundary() {
        let item = Item {
            id: 7,
            name: "Croissant".to_string(),
            description: None,
            category_id: Some(1),
            quantity: 2,
            unit: "pcs".to_string(),
            unit_price_cents: 150,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(item.has_stock_for(2)); // exactly the stock on hand
        assert!(!item.has_stock_for(3));
    }
}
