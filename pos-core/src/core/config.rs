use crate::pricing::tax_rate_from_percent;
use rust_decimal::Decimal;
use shared::models::DEFAULT_TABLE_CAPACITY;
use std::path::PathBuf;

/// POS configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory holding `pos.redb` |
/// | OPERATOR_ID | local | Scope of all persisted records |
/// | TAX_RATE_PERCENT | 19 | VAT contained in prices |
/// | DEFAULT_TABLE_CAPACITY | 4 | Seats of a new table without explicit capacity |
/// | CATALOG_PATH | (unset) | Menu JSON file; sample menu if unset |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | Daily rolling log files instead of stdout |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/pos OPERATOR_ID=kasse-1 cargo run --bin pos
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub operator_id: String,
    pub tax_rate_percent: u32,
    pub default_table_capacity: u32,
    pub catalog_path: Option<String>,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            operator_id: std::env::var("OPERATOR_ID")
                .ok()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| "local".into()),
            tax_rate_percent: std::env::var("TAX_RATE_PERCENT")
                .ok()
                .and_then(|p| p.parse::<u32>().ok())
                .filter(|p| *p <= 100)
                .unwrap_or(19),
            default_table_capacity: std::env::var("DEFAULT_TABLE_CAPACITY")
                .ok()
                .and_then(|c| c.parse::<u32>().ok())
                .filter(|c| *c > 0)
                .unwrap_or(DEFAULT_TABLE_CAPACITY),
            catalog_path: std::env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the fields tests care about
    pub fn with_overrides(work_dir: impl Into<String>, operator_id: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.operator_id = operator_id.into();
        config
    }

    pub fn tax_rate(&self) -> Decimal {
        tax_rate_from_percent(self.tax_rate_percent)
    }

    /// Path of the redb database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("pos.redb")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
