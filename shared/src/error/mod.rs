//! Error system for the POS workspace
//!
//! - [`ErrorCode`]: numeric error codes grouped by domain
//! - [`ErrorCategory`]: classification of codes by range
//! - [`PosError`]: the error type returned by POS operations
//!
//! # Error Code Ranges
//!
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 7xxx: Table errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCode, PosError};
//!
//! let err = PosError::NoTableSelected;
//! assert_eq!(err.code(), ErrorCode::TableNotSelected);
//! assert!(err.notification().is_destructive());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{PosError, PosResult};
