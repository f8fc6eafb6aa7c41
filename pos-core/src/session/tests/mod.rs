use super::*;
use crate::notify::MemoryNotifier;
use crate::storage::{MemoryStore, StorageError, StorageResult};
use shared::Severity;
use std::cell::Cell;

mod test_reports;

/// MemoryStore whose writes can be switched to fail
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_table_writes: Cell<bool>,
    fail_order_writes: Cell<bool>,
}

impl FlakyStore {
    fn unavailable() -> StorageError {
        StorageError::Unavailable("connection refused".to_string())
    }
}

impl PosStore for FlakyStore {
    fn load_tables(&self, operator_id: &str) -> StorageResult<Vec<Table>> {
        self.inner.load_tables(operator_id)
    }

    fn insert_table(&self, operator_id: &str, table: &Table) -> StorageResult<()> {
        if self.fail_table_writes.get() {
            return Err(Self::unavailable());
        }
        self.inner.insert_table(operator_id, table)
    }

    fn update_table_status(
        &self,
        operator_id: &str,
        table_id: &str,
        status: TableStatus,
    ) -> StorageResult<()> {
        if self.fail_table_writes.get() {
            return Err(Self::unavailable());
        }
        self.inner.update_table_status(operator_id, table_id, status)
    }

    fn load_orders(&self, operator_id: &str) -> StorageResult<Vec<Order>> {
        self.inner.load_orders(operator_id)
    }

    fn insert_order(&self, operator_id: &str, order: &Order) -> StorageResult<()> {
        if self.fail_order_writes.get() {
            return Err(Self::unavailable());
        }
        self.inner.insert_order(operator_id, order)
    }

    fn update_order_status(
        &self,
        operator_id: &str,
        order_id: u64,
        status: OrderStatus,
        updated_at: i64,
    ) -> StorageResult<()> {
        if self.fail_order_writes.get() {
            return Err(Self::unavailable());
        }
        self.inner
            .update_order_status(operator_id, order_id, status, updated_at)
    }
}

const OPERATOR: &str = "test-op";

type TestSession<'a> = PosSession<&'a FlakyStore, MemoryNotifier>;

fn create_test_session<'a>(store: &'a FlakyStore, notifier: &MemoryNotifier) -> TestSession<'a> {
    PosSession::load(
        store,
        notifier.clone(),
        Catalog::sample(),
        SessionOptions::new(OPERATOR),
    )
    .unwrap()
}

/// Session with tables T1 and T2, notifications drained
fn session_with_tables<'a>(store: &'a FlakyStore, notifier: &MemoryNotifier) -> TestSession<'a> {
    let mut session = create_test_session(store, notifier);
    session.add_table(TableCreate::named("Tisch 1")).unwrap();
    session.add_table(TableCreate::named("Tisch 2")).unwrap();
    notifier.drain();
    session
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn stored_status(store: &FlakyStore, table_id: &str) -> TableStatus {
    store
        .inner
        .load_tables(OPERATOR)
        .unwrap()
        .into_iter()
        .find(|t| t.id == table_id)
        .map(|t| t.status)
        .unwrap()
}

#[test]
fn test_load_restores_tables_and_orders() {
    let store = FlakyStore::default();
    let notifier = MemoryNotifier::new();
    {
        let mut session = session_with_tables(&store, &notifier);
        session.select_table("T1").unwrap();
        session.select_product(1).unwrap();
        session
            .checkout(PaymentMethod::Cash, &Discount::none())
            .unwrap();
    }

    let session = create_test_session(&store, &notifier);
    assert_eq!(session.tables().len(), 2);
    assert_eq!(session.orders().len(), 1);
    assert_eq!(session.next_order_id(), 2);
    assert!(session.active_table().is_none());
    assert!(session.cart("T1").is_empty());
    assert!(!session.epoch().is_empty());
}

#[test]
fn test_sessions_are_scoped_by_operator() {
    let store = FlakyStore::default();
    let notifier = MemoryNotifier::new();
    let _ = session_with_tables(&store, &notifier);

    let other = PosSession::load(
        &store,
        notifier.clone(),
        Catalog::sample(),
        SessionOptions::new("someone-else"),
    )
    .unwrap();
    assert!(other.tables().is_empty());
}
