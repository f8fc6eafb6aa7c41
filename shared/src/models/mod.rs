//! Data models
//!
//! Shared between the POS core and its persistence layer.
//! Money is `rust_decimal::Decimal` in currency units (tax inclusive).

pub mod cart_item;
pub mod category;
pub mod daily_report;
pub mod dining_table;
pub mod order;
pub mod product;

// Re-exports
pub use cart_item::*;
pub use category::*;
pub use daily_report::*;
pub use dining_table::*;
pub use order::*;
pub use product::*;
