//! # Services
//!
//! Operations that own a transaction. Repositories only run statements;
//! services decide where a transaction begins, what goes inside it, and when
//! it is committed or rolled back.
//!
//! - [`CheckoutService`] - add to cart, commit an order
//! - [`InventoryService`] - restock

pub mod checkout;
pub mod inventory;

pub use checkout::CheckoutService;
pub use inventory::InventoryService;
