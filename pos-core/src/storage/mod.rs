//! Persistence layer
//!
//! Every record is scoped by operator id; two operators sharing a store never
//! see each other's tables or orders.
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`RedbStore`] | File-backed (or in-memory) redb database |
//! | [`MemoryStore`] | Plain in-process maps |

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use shared::PosError;
use shared::models::{Order, OrderStatus, Table, TableStatus};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for PosError {
    fn from(err: StorageError) -> Self {
        PosError::storage(err.to_string())
    }
}

/// Remote persistence for tables and orders
///
/// Writes are single-record and synchronous. Callers decide whether local
/// state changes before or after a write succeeds.
pub trait PosStore {
    /// Tables of an operator in creation order
    fn load_tables(&self, operator_id: &str) -> StorageResult<Vec<Table>>;

    fn insert_table(&self, operator_id: &str, table: &Table) -> StorageResult<()>;

    fn update_table_status(
        &self,
        operator_id: &str,
        table_id: &str,
        status: TableStatus,
    ) -> StorageResult<()>;

    /// Orders of an operator sorted by id
    fn load_orders(&self, operator_id: &str) -> StorageResult<Vec<Order>>;

    fn insert_order(&self, operator_id: &str, order: &Order) -> StorageResult<()>;

    fn update_order_status(
        &self,
        operator_id: &str,
        order_id: u64,
        status: OrderStatus,
        updated_at: i64,
    ) -> StorageResult<()>;
}

impl<S: PosStore + ?Sized> PosStore for &S {
    fn load_tables(&self, operator_id: &str) -> StorageResult<Vec<Table>> {
        (**self).load_tables(operator_id)
    }

    fn insert_table(&self, operator_id: &str, table: &Table) -> StorageResult<()> {
        (**self).insert_table(operator_id, table)
    }

    fn update_table_status(
        &self,
        operator_id: &str,
        table_id: &str,
        status: TableStatus,
    ) -> StorageResult<()> {
        (**self).update_table_status(operator_id, table_id, status)
    }

    fn load_orders(&self, operator_id: &str) -> StorageResult<Vec<Order>> {
        (**self).load_orders(operator_id)
    }

    fn insert_order(&self, operator_id: &str, order: &Order) -> StorageResult<()> {
        (**self).insert_order(operator_id, order)
    }

    fn update_order_status(
        &self,
        operator_id: &str,
        order_id: u64,
        status: OrderStatus,
        updated_at: i64,
    ) -> StorageResult<()> {
        (**self).update_order_status(operator_id, order_id, status, updated_at)
    }
}
