//! Shared types for the POS workspace
//!
//! Domain models, error types and notification messages used by the
//! point-of-sale core and anything that talks to it.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ErrorCategory, ErrorCode, PosError, PosResult};
pub use message::{Notification, Severity};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
