//! # Bakery Service
//!
//! Application service layer for Bakery POS.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         bakery-service                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                        PosService                                │  │
//! │  │                                                                  │  │
//! │  │   orders     place_order, get_order, list_orders,                │  │
//! │  │              change_order_status, delete_order                   │  │
//! │  │   inventory  deduct_stock                                        │  │
//! │  │   catalog    create_item, get_item, list_items, delete_item      │  │
//! │  └───────┬──────────────────────────────────────────────────────────┘  │
//! │          │ DTOs in (camelCase JSON)          ApiError out              │
//! │          ▼                                                             │
//! │     bakery-db  (repositories, transactions)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service validates input BEFORE anything touches the store, so a
//! malformed request never opens a transaction. Business rules that can
//! only be checked against live data (stock sufficiency, lifecycle state)
//! are enforced inside the repository transactions and surface here as
//! domain errors.

pub mod catalog;
pub mod dto;
pub mod error;
pub mod inventory;
pub mod orders;

pub use dto::*;
pub use error::{ApiError, ErrorCode};

use bakery_db::Database;

/// The point-of-sale service facade.
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PosService {
    db: Database,
}

impl PosService {
    /// Creates a service over an initialized database.
    pub fn new(db: Database) -> Self {
        PosService { db }
    }

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }
}
