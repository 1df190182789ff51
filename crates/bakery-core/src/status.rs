//! # Order Status State Machine
//!
//! The lifecycle of an order is a small finite-state machine. The store
//! accepts only the transitions in the table below; anything else is a
//! business rule violation, not a storage error.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Lifecycle                                    │
//! │                                                                         │
//! │   ┌─────────┐      ┌───────────┐      ┌───────────┐                    │
//! │   │ Pending ├─────►│ Preparing ├─────►│ Completed │ (terminal)         │
//! │   └────┬────┘      └─────┬─────┘      └───────────┘                    │
//! │        │                 │                  ▲                           │
//! │        │                 │                  │ (counter rush:            │
//! │        │                 │                  │  pending → completed      │
//! │        │                 │                  │  is allowed directly)     │
//! │        ├─────────────────┼──────────────────┘                           │
//! │        │                 │                                              │
//! │        ▼                 ▼                                              │
//! │   ┌───────────────────────────┐                                        │
//! │   │        Cancelled          │ (terminal)                             │
//! │   └───────────────────────────┘                                        │
//! │                                                                         │
//! │   Completing an order is the ONE transition that also deducts stock.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Order Status
// =============================================================================

/// The status of a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been taken and is waiting for the kitchen.
    Pending,
    /// Kitchen is working on the order.
    Preparing,
    /// Order was handed over; stock has been deducted.
    Completed,
    /// Order was abandoned before completion; stock untouched.
    Cancelled,
}

impl OrderStatus {
    /// Returns true when no further transition leaves this status.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Checks the transition table.
    ///
    /// Self-transitions are rejected too: writing `completed` over
    /// `completed` would invite a second stock deduction attempt.
    pub const fn can_transition_to(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (*self, to),
            (Pending, Preparing)
                | (Pending, Completed)
                | (Pending, Cancelled)
                | (Preparing, Completed)
                | (Preparing, Cancelled)
        )
    }

    /// Validates a transition, returning the target status on success.
    ///
    /// ## Example
    /// ```rust
    /// use bakery_core::OrderStatus;
    ///
    /// let next = OrderStatus::Pending.transition(OrderStatus::Preparing).unwrap();
    /// assert_eq!(next, OrderStatus::Preparing);
    ///
    /// assert!(OrderStatus::Completed.transition(OrderStatus::Pending).is_err());
    /// ```
    pub fn transition(self, to: OrderStatus) -> Result<OrderStatus, CoreError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(CoreError::InvalidStatusTransition { from: self, to })
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn test_cancel_path_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_frozen() {
        for to in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Completed.can_transition_to(to));
            assert!(!OrderStatus::Cancelled.can_transition_to(to));
        }
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_no_backward_or_self_transitions() {
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn test_transition_returns_error_with_context() {
        let err = OrderStatus::Completed
            .transition(OrderStatus::Preparing)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::CoreError::InvalidStatusTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Preparing,
            }
        ));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }
}
