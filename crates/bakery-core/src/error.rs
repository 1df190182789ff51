//! # Error Types
//!
//! Domain-specific error types for bakery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bakery-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bakery-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                         (wraps CoreError when a transaction aborts     │
//! │                          on a domain rule)                             │
//! │                                                                         │
//! │  bakery-service errors (separate crate)                                │
//! │  └── ApiError         - What the client sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::status::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item referenced by a stock deduction does not exist.
    ///
    /// ## When This Occurs
    /// - A deduction batch names an item id that was deleted
    /// - The conditional decrement matched zero rows and the follow-up
    ///   read found no item at all
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// Insufficient stock to apply a deduction.
    ///
    /// ## When This Occurs
    /// - A deduction requests more than the item's on-hand quantity
    /// - The whole batch the deduction belongs to is rolled back
    #[error("Insufficient stock for item {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: i64,
        available: i64,
        requested: i64,
    },

    /// Order status change is not allowed by the state machine.
    ///
    /// ## When This Occurs
    /// - Moving a completed or cancelled order anywhere
    /// - Moving an order backwards (e.g., preparing → pending)
    #[error("Order cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Inventory was already deducted for this order.
    ///
    /// ## When This Occurs
    /// - A second attempt to complete the same order
    /// - The `inventory_applied` flag guards against double-decrementing
    #[error("Inventory already applied for order {order_id}")]
    InventoryAlreadyApplied { order_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any write is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A batch or line list entry is malformed; names the offending entry.
    #[error("entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
