//! # API Error Type
//!
//! Unified error type for service calls.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bakery POS                             │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  placeOrder(...)                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  PosService method                                               │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation failed? ── ValidationError ──────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Transaction aborted? ── DbError::Domain ───── ApiError ───────►│  │
//! │  │         │                (business rule)                         │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage failed? ────── DbError::QueryFailed ── (logged,         │  │
//! │  │                                                  generic msg)    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Client receives: { "code": "INSUFFICIENT_STOCK",                      │
//! │                     "message": "Insufficient stock for item 7: ..." }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business rule failures keep their full message; storage failures are
//! logged server-side and flattened to a generic message so internals
//! never leak to the client.

use serde::Serialize;
use ts_rs::TS;

use bakery_core::{CoreError, ValidationError};
use bakery_db::DbError;

/// API error returned from service calls.
///
/// ## Serialization
/// This is what the client receives when a call fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Order not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await placeOrder(request);
/// } catch (e) {
///   switch (e.code) {
///     case 'INSUFFICIENT_STOCK':
///       showNotification(e.message);
///       break;
///     case 'VALIDATION_ERROR':
///       showForm(e.message);
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Business logic error (422)
    BusinessLogic,

    /// Insufficient stock to satisfy a deduction
    InsufficientStock,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            // A transaction aborted on a business rule; the rule's own
            // message is what the cashier needs to see.
            DbError::Domain(core) => ApiError::from(core),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", id),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::InvalidStatusTransition { from, to } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Order cannot move from {} to {}", from, to),
            ),
            CoreError::InventoryAlreadyApplied { order_id } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Inventory already applied for order {}", order_id),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_keeps_its_message() {
        let db_err = DbError::Domain(CoreError::InsufficientStock {
            item_id: 7,
            available: 2,
            requested: 3,
        });
        let api: ApiError = db_err.into();
        assert_eq!(api.code, ErrorCode::InsufficientStock);
        assert!(api.message.contains("item 7"));
        assert!(api.message.contains("available 2"));
    }

    #[test]
    fn test_query_failure_is_flattened() {
        let db_err = DbError::QueryFailed("CHECK constraint failed: quantity".to_string());
        let api: ApiError = db_err.into();
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert_eq!(api.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_shape() {
        let api = ApiError::not_found("Order", 42);
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Order not found: 42");
    }
}
