//! Restaurant POS core
//!
//! Table management, per-table carts, pricing with discount and backed-out
//! VAT, and a checkout flow that appends to an order ledger.
//!
//! # Module layout
//!
//! ```text
//! pos-core/src/
//! ├── core/          # Config
//! ├── utils/         # Logging setup
//! ├── pricing/       # Subtotal / discount / tax calculation
//! ├── orders/        # Order ledger and id counter
//! ├── storage/       # PosStore trait, redb and in-memory backends
//! ├── session/       # PosSession, the stateful service
//! ├── cart.rs        # Per-table carts
//! ├── tables.rs      # Table list and status lifecycle
//! ├── catalog.rs     # Menu items and categories
//! ├── notify.rs      # Notification sinks
//! └── reports.rs     # Daily report and dashboard
//! ```
//!
//! # Example
//!
//! ```
//! use pos_core::{Catalog, Discount, MemoryNotifier, MemoryStore, PosSession, SessionOptions};
//! use shared::models::{PaymentMethod, TableCreate};
//!
//! let mut session = PosSession::load(
//!     MemoryStore::new(),
//!     MemoryNotifier::new(),
//!     Catalog::sample(),
//!     SessionOptions::new("demo"),
//! )
//! .unwrap();
//!
//! let table = session.add_table(TableCreate::named("Fenster")).unwrap();
//! session.select_table(&table.id).unwrap();
//! session.select_product(1).unwrap();
//! let order = session.checkout(PaymentMethod::Cash, &Discount::none()).unwrap();
//! assert_eq!(order.id, 1);
//! ```

pub mod cart;
pub mod catalog;
pub mod core;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod reports;
pub mod session;
pub mod storage;
pub mod tables;
pub mod utils;

pub use cart::{CartBook, CartChange};
pub use catalog::Catalog;
pub use crate::core::Config;
pub use notify::{MemoryNotifier, Notifier, TracingNotifier};
pub use orders::OrderLedger;
pub use pricing::{Discount, PriceBreakdown};
pub use session::{PosSession, SessionOptions};
pub use storage::{MemoryStore, PosStore, RedbStore, StorageError, StorageResult};
pub use tables::{StatusTransition, TableBoard};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the config, prepare the work dir and start logging
pub fn setup_environment() -> std::io::Result<Config> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(config)
}
