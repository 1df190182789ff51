//! # Validation Module
//!
//! Input validation utilities for Bakery POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React)                                             │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service surface (Rust)                                       │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation, BEFORE any write           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (quantity >= 0) on item                                     │
//! │  └── CHECK (quantity > 0) on order_items                               │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{Deduction, LineDraft};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person-name snapshot (customer or cashier).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line or deduction quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways, staff meals)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a row id supplied by a caller.
///
/// Generated ids start at 1, so anything below that can never match a row.
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the line list of a draft order, before any write.
///
/// ## Rules
/// - At least one line (an order with no lines is not an order)
/// - At most MAX_ORDER_LINES lines
/// - Per line: item id positive, name non-empty, quantity positive and
///   bounded, price non-negative
///
/// The first offending line wins; its index is reported.
pub fn validate_lines(lines: &[LineDraft]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        });
    }

    if lines.len() > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "lines".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }

    for (index, line) in lines.iter().enumerate() {
        let offending = |e: ValidationError| ValidationError::InvalidEntry {
            index,
            reason: e.to_string(),
        };

        validate_id("itemId", line.item_id).map_err(offending)?;
        validate_name("itemName", &line.item_name).map_err(offending)?;
        validate_quantity(line.quantity).map_err(offending)?;
        validate_price_cents(line.unit_price_cents).map_err(offending)?;
    }

    Ok(())
}

/// Validates a deduction batch entry, identifying the offending entry.
///
/// Called per entry, in batch order, so the first failure aborts before
/// later entries are even looked at.
pub fn validate_deduction(index: usize, d: &Deduction) -> ValidationResult<()> {
    let offending = |e: ValidationError| ValidationError::InvalidEntry {
        index,
        reason: e.to_string(),
    };

    validate_id("itemId", d.item_id).map_err(offending)?;
    validate_quantity(d.quantity).map_err(offending)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: i64, name: &str, qty: i64, price: i64) -> LineDraft {
        LineDraft {
            item_id,
            item_name: name.to_string(),
            quantity: qty,
            unit_price_cents: price,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("customerName", "Ayesha").is_ok());
        assert!(validate_name("customerName", "").is_err());
        assert!(validate_name("customerName", "   ").is_err());
        assert!(validate_name("customerName", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(150).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_lines_rejects_empty() {
        assert!(validate_lines(&[]).is_err());
    }

    #[test]
    fn test_validate_lines_reports_first_offender() {
        let lines = vec![
            line(7, "Croissant", 2, 150),
            line(9, "Baguette", 0, 300), // bad quantity
            line(0, "Scone", 1, 200),    // bad id, but later
        ];
        let err = validate_lines(&lines).unwrap_err();
        match err {
            ValidationError::InvalidEntry { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_lines_accepts_duplicate_item_ids() {
        // Same item twice on one order is legal; no de-duplication.
        let lines = vec![line(7, "Croissant", 1, 150), line(7, "Croissant", 3, 150)];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_validate_deduction() {
        let ok = Deduction { item_id: 7, quantity: 2 };
        assert!(validate_deduction(0, &ok).is_ok());

        let bad = Deduction { item_id: 7, quantity: -2 };
        let err = validate_deduction(3, &bad).unwrap_err();
        match err {
            ValidationError::InvalidEntry { index, .. } => assert_eq!(index, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
