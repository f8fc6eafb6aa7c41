//! redb-backed store
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `dining_tables` | `(operator_id, table_id)` | JSON `TableRow` (table + creation ordinal) |
//! | `orders` | `(operator_id, order_id)` | JSON `Order` |
//!
//! Commits use redb's default `Durability::Immediate`: a write is on disk as
//! soon as `commit()` returns.

use super::{PosStore, StorageError, StorageResult};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderStatus, Table, TableStatus};
use std::path::Path;
use std::sync::Arc;

/// key = (operator_id, table_id), value = JSON-serialized TableRow
const TABLES_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("dining_tables");

/// key = (operator_id, order_id), value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("orders");

/// Table ids sort as strings ("T10" < "T2"), so rows carry their insertion rank
#[derive(Debug, Serialize, Deserialize)]
struct TableRow {
    ordinal: u64,
    #[serde(flatten)]
    table: Table,
}

#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TABLES_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl PosStore for RedbStore {
    fn load_tables(&self, operator_id: &str) -> StorageResult<Vec<Table>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLES_TABLE)?;

        let mut rows = Vec::new();
        for result in table.range((operator_id, "")..)? {
            let (key, value) = result?;
            if key.value().0 != operator_id {
                break;
            }
            let row: TableRow = serde_json::from_slice(value.value())?;
            rows.push(row);
        }

        rows.sort_by_key(|row| row.ordinal);
        Ok(rows.into_iter().map(|row| row.table).collect())
    }

    fn insert_table(&self, operator_id: &str, dining_table: &Table) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TABLES_TABLE)?;
            let key = (operator_id, dining_table.id.as_str());
            if table.get(key)?.is_some() {
                return Err(StorageError::Duplicate(dining_table.id.clone()));
            }

            let mut ordinal = 0u64;
            for result in table.range((operator_id, "")..)? {
                let (existing, _) = result?;
                if existing.value().0 != operator_id {
                    break;
                }
                ordinal += 1;
            }

            let row = TableRow {
                ordinal,
                table: dining_table.clone(),
            };
            let value = serde_json::to_vec(&row)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn update_table_status(
        &self,
        operator_id: &str,
        table_id: &str,
        status: TableStatus,
    ) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TABLES_TABLE)?;
            let key = (operator_id, table_id);
            let mut row: TableRow = match table.get(key)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::TableNotFound(table_id.to_string())),
            };
            row.table.status = status;
            let value = serde_json::to_vec(&row)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn load_orders(&self, operator_id: &str) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.range((operator_id, 0u64)..=(operator_id, u64::MAX))? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            orders.push(order);
        }

        Ok(orders)
    }

    fn insert_order(&self, operator_id: &str, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let key = (operator_id, order.id);
            if table.get(key)?.is_some() {
                return Err(StorageError::Duplicate(format!("order {}", order.id)));
            }
            let value = serde_json::to_vec(order)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn update_order_status(
        &self,
        operator_id: &str,
        order_id: u64,
        status: OrderStatus,
        updated_at: i64,
    ) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let key = (operator_id, order_id);
            let mut order: Order = match table.get(key)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::OrderNotFound(order_id)),
            };
            order.status = status;
            order.updated_at = updated_at;
            let value = serde_json::to_vec(&order)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{CartItem, MenuItem, PaymentMethod, Platform};

    fn create_test_table(n: usize) -> Table {
        Table {
            id: format!("T{}", n),
            name: format!("Tisch {}", n),
            status: TableStatus::Free,
            capacity: 4,
            position: None,
        }
    }

    fn create_test_order(id: u64) -> Order {
        let item = CartItem::new(MenuItem::new(
            8,
            "Pizza Sucuk",
            Decimal::new(950, 2),
            "Pizza",
        ));
        Order {
            id,
            table_id: Some("T1".to_string()),
            items: vec![item],
            subtotal: Decimal::new(950, 2),
            discount: Decimal::ZERO,
            total: Decimal::new(950, 2),
            status: OrderStatus::Kitchen,
            platform: Platform::Pos,
            customer_name: None,
            payment_method: Some(PaymentMethod::Cash),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_tables_keep_creation_order() {
        let store = RedbStore::open_in_memory().unwrap();
        for n in 1..=11 {
            store.insert_table("op-a", &create_test_table(n)).unwrap();
        }

        let ids: Vec<String> = store
            .load_tables("op-a")
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids.len(), 11);
        assert_eq!(ids[1], "T2");
        assert_eq!(ids[9], "T10");
        assert_eq!(ids[10], "T11");
    }

    #[test]
    fn test_operator_scoping() {
        let store = RedbStore::open_in_memory().unwrap();
        store.insert_table("op-a", &create_test_table(1)).unwrap();
        store.insert_table("op-ab", &create_test_table(1)).unwrap();
        store.insert_table("op-ab", &create_test_table(2)).unwrap();
        store.insert_order("op-a", &create_test_order(1)).unwrap();

        assert_eq!(store.load_tables("op-a").unwrap().len(), 1);
        assert_eq!(store.load_tables("op-ab").unwrap().len(), 2);
        assert!(store.load_tables("op-b").unwrap().is_empty());
        assert!(store.load_orders("op-ab").unwrap().is_empty());
        assert_eq!(store.load_orders("op-a").unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let store = RedbStore::open_in_memory().unwrap();
        store.insert_table("op", &create_test_table(1)).unwrap();
        let err = store.insert_table("op", &create_test_table(1)).unwrap_err();
        assert!(matches!(err, StorageError::Duplicate(_)));
    }

    #[test]
    fn test_update_table_status() {
        let store = RedbStore::open_in_memory().unwrap();
        store.insert_table("op", &create_test_table(1)).unwrap();
        store
            .update_table_status("op", "T1", TableStatus::Reserved)
            .unwrap();

        let tables = store.load_tables("op").unwrap();
        assert_eq!(tables[0].status, TableStatus::Reserved);

        let err = store
            .update_table_status("op", "T9", TableStatus::Free)
            .unwrap_err();
        assert!(matches!(err, StorageError::TableNotFound(_)));
    }

    #[test]
    fn test_orders_round_trip_sorted() {
        let store = RedbStore::open_in_memory().unwrap();
        for id in [3, 1, 2] {
            store.insert_order("op", &create_test_order(id)).unwrap();
        }

        let orders = store.load_orders("op").unwrap();
        let ids: Vec<u64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(orders[0], create_test_order(1));
        assert_eq!(orders[0].total, Decimal::new(950, 2));
    }

    #[test]
    fn test_update_order_status() {
        let store = RedbStore::open_in_memory().unwrap();
        store.insert_order("op", &create_test_order(1)).unwrap();
        store
            .update_order_status("op", 1, OrderStatus::Paid, 1_700_000_100_000)
            .unwrap();

        let order = &store.load_orders("op").unwrap()[0];
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.updated_at, 1_700_000_100_000);

        let err = store
            .update_order_status("op", 42, OrderStatus::Paid, 0)
            .unwrap_err();
        assert!(matches!(err, StorageError::OrderNotFound(42)));
    }

    #[test]
    fn test_file_backed_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pos.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.insert_table("op", &create_test_table(1)).unwrap();
            store.insert_order("op", &create_test_order(1)).unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.load_tables("op").unwrap().len(), 1);
        assert_eq!(store.load_orders("op").unwrap()[0].id, 1);
    }
}
