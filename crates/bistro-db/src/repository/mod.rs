//! # Repository Module
//!
//! Database repository implementations for Bistro POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Service / shell                                                       │
//! │       │                                                                 │
//! │       │  db.catalog().find_by_id(7)                                    │
//! │       ▼                                                                 │
//! │  CatalogRepository     ── menu reads, seeding inserts                  │
//! │  OrderRepository       ── order reads + header/line inserts (tx)       │
//! │  InventoryRepository   ── stock writes (tx) + audit trail              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read methods take `&self` and use the pool. Methods that must run inside
//! a caller's transaction are associated functions taking
//! `&mut SqliteConnection`, and are crate-private so only the services can
//! compose them.
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`] - Menu items and categories
//! - [`OrderRepository`] - Committed orders and lines
//! - [`InventoryRepository`] - Stock writes and audit trail

pub mod catalog;
pub mod inventory;
pub mod order;

pub use catalog::CatalogRepository;
pub use inventory::InventoryRepository;
pub use order::OrderRepository;
