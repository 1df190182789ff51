//! # bakery-db: Database Layer for Bakery POS
//!
//! This crate provides database access for the bakery back end.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bakery POS Data Flow                             │
//! │                                                                         │
//! │  Service call (place_order, change_order_status, ...)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bakery-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (item.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   order.rs)   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ OrderRepo     │    │              │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   WAL mode, CHECK(quantity >= 0) backstop on the catalog       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, order)
//!
//! ## Consistency Guarantees
//!
//! Three operations here are multi-statement transactions; everything else
//! is single-row CRUD:
//!
//! 1. **Order placement** - an order and all of its lines commit together
//!    or not at all. Readers never see an order without its lines.
//! 2. **Inventory adjustment** - a batch of conditional stock decrements
//!    applies all-or-nothing; a mid-batch failure undoes the earlier
//!    decrements of the same batch.
//! 3. **Status change** - the status write, the idempotency latch, and the
//!    per-line stock deduction on completion sit in ONE transaction, so an
//!    order can never be `completed` with stock left undeducted.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bakery_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/bakery.db");
//! let db = Database::new(config).await?;
//!
//! let order = db
//!     .orders()
//!     .place_order(&draft, &lines)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
