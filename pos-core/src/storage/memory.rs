use super::{PosStore, StorageError, StorageResult};
use shared::models::{Order, OrderStatus, Table, TableStatus};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct OperatorData {
    tables: Vec<Table>,
    orders: BTreeMap<u64, Order>,
}

/// In-process store, mainly for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, OperatorData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, OperatorData>> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PosStore for MemoryStore {
    fn load_tables(&self, operator_id: &str) -> StorageResult<Vec<Table>> {
        Ok(self
            .lock()
            .get(operator_id)
            .map(|data| data.tables.clone())
            .unwrap_or_default())
    }

    fn insert_table(&self, operator_id: &str, table: &Table) -> StorageResult<()> {
        let mut data = self.lock();
        let operator = data.entry(operator_id.to_string()).or_default();
        if operator.tables.iter().any(|t| t.id == table.id) {
            return Err(StorageError::Duplicate(table.id.clone()));
        }
        operator.tables.push(table.clone());
        Ok(())
    }

    fn update_table_status(
        &self,
        operator_id: &str,
        table_id: &str,
        status: TableStatus,
    ) -> StorageResult<()> {
        let mut data = self.lock();
        let table = data
            .get_mut(operator_id)
            .and_then(|operator| operator.tables.iter_mut().find(|t| t.id == table_id))
            .ok_or_else(|| StorageError::TableNotFound(table_id.to_string()))?;
        table.status = status;
        Ok(())
    }

    fn load_orders(&self, operator_id: &str) -> StorageResult<Vec<Order>> {
        Ok(self
            .lock()
            .get(operator_id)
            .map(|data| data.orders.values().cloned().collect())
            .unwrap_or_default())
    }

    fn insert_order(&self, operator_id: &str, order: &Order) -> StorageResult<()> {
        let mut data = self.lock();
        let operator = data.entry(operator_id.to_string()).or_default();
        if operator.orders.contains_key(&order.id) {
            return Err(StorageError::Duplicate(format!("order {}", order.id)));
        }
        operator.orders.insert(order.id, order.clone());
        Ok(())
    }

    fn update_order_status(
        &self,
        operator_id: &str,
        order_id: u64,
        status: OrderStatus,
        updated_at: i64,
    ) -> StorageResult<()> {
        let mut data = self.lock();
        let order = data
            .get_mut(operator_id)
            .and_then(|operator| operator.orders.get_mut(&order_id))
            .ok_or(StorageError::OrderNotFound(order_id))?;
        order.status = status;
        order.updated_at = updated_at;
        Ok(())
    }
}
