//! # Repository Module
//!
//! Database repository implementations for Bakery POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service call                                                          │
//! │       │                                                                 │
//! │       │  db.orders().place_order(&draft, &lines)                       │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── place_order(&self, draft, lines)      (transaction)               │
//! │  ├── change_status(&self, id, new_status)  (transaction)               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── delete(&self, id)                     (transaction)               │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • The transaction boundaries are visible in the API                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Catalog reads/CRUD and the inventory
//!   adjustment transaction (conditional decrements)
//! - [`order::OrderRepository`] - Order placement, lifecycle, and reads

pub mod item;
pub mod order;
