//! Core error type

use super::codes::ErrorCode;
use crate::message::Notification;
use thiserror::Error;

/// Errors raised by POS operations
///
/// Precondition violations are rejected before any state changes. Storage
/// failures carry the backend message as text so that this crate stays
/// independent of the persistence implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PosError {
    #[error("No table selected")]
    NoTableSelected,

    #[error("Cart is empty for table {0}")]
    EmptyCart(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Item {item_id} not in cart of table {table_id}")]
    ItemNotFound { table_id: String, item_id: i64 },

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Product not available: {0}")]
    ProductUnavailable(String),

    #[error("Invalid table name")]
    InvalidTableName,

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PosError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoTableSelected => ErrorCode::TableNotSelected,
            Self::EmptyCart(_) => ErrorCode::OrderEmpty,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
            Self::ItemNotFound { .. } => ErrorCode::OrderItemNotFound,
            Self::ProductNotFound(_) => ErrorCode::ProductNotFound,
            Self::ProductUnavailable(_) => ErrorCode::ProductUnavailable,
            Self::InvalidTableName => ErrorCode::TableNameInvalid,
            Self::OrderNotFound(_) => ErrorCode::OrderNotFound,
            Self::InvalidCatalog(_) => ErrorCode::CatalogInvalid,
            Self::Storage(_) => ErrorCode::DatabaseError,
        }
    }

    /// User-visible notification for this error (German UI labels)
    pub fn notification(&self) -> Notification {
        match self {
            Self::NoTableSelected => Notification::destructive(
                "Kein Tisch ausgewählt",
                "Bitte wählen Sie zuerst einen Tisch aus.",
            ),
            Self::EmptyCart(_) => {
                Notification::destructive("Warenkorb leer", "Keine Artikel im Warenkorb.")
            }
            Self::TableNotFound(id) => {
                Notification::destructive("Fehler", format!("Tisch {} wurde nicht gefunden.", id))
            }
            Self::ItemNotFound { .. } => {
                Notification::destructive("Fehler", "Artikel ist nicht im Warenkorb.")
            }
            Self::ProductNotFound(id) => {
                Notification::destructive("Fehler", format!("Artikel {} wurde nicht gefunden.", id))
            }
            Self::ProductUnavailable(name) => {
                Notification::destructive("Artikel nicht verfügbar", format!("{} ist aus.", name))
            }
            Self::InvalidTableName => {
                Notification::destructive("Fehler", "Bitte geben Sie einen Tischnamen ein.")
            }
            Self::OrderNotFound(id) => Notification::destructive(
                "Fehler",
                format!("Bestellung #{} wurde nicht gefunden.", id),
            ),
            Self::InvalidCatalog(_) => {
                Notification::destructive("Fehler", "Speisekarte konnte nicht geladen werden.")
            }
            Self::Storage(_) => {
                Notification::destructive("Fehler", "Daten konnten nicht gespeichert werden.")
            }
        }
    }
}

/// Result type for POS operations
pub type PosResult<T> = Result<T, PosError>;
