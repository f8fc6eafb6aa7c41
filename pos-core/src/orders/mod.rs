//! Order Ledger Module
//!
//! Append-only list of completed orders plus the order id counter.
//!
//! # Order lifecycle
//!
//! ```text
//! checkout ──► Kitchen ──► (Ready / Served / Paid, set externally)
//! ```
//!
//! Ids are handed out once per checkout attempt and never reused, so a failed
//! write leaves a gap in the sequence.

mod ledger;

pub use ledger::{OrderDraft, OrderLedger, build_order};
