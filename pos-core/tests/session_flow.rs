//! End-to-end session flows against a file-backed redb store

use pos_core::{
    Catalog, Discount, MemoryNotifier, PosSession, PosStore, RedbStore, SessionOptions,
};
use rust_decimal::Decimal;
use shared::models::{OrderStatus, PaymentMethod, TableCreate, TableStatus};
use shared::{PosError, Severity};
use std::path::Path;

const OPERATOR: &str = "kasse-1";

fn open_session(path: &Path, notifier: &MemoryNotifier) -> PosSession<RedbStore, MemoryNotifier> {
    let store = RedbStore::open(path).unwrap();
    PosSession::load(
        store,
        notifier.clone(),
        Catalog::sample(),
        SessionOptions::new(OPERATOR),
    )
    .unwrap()
}

#[test]
fn test_service_round() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pos.redb");
    let notifier = MemoryNotifier::new();
    let mut session = open_session(&db, &notifier);

    session.add_table(TableCreate::named("Fenster")).unwrap();
    session.add_table(TableCreate::named("Theke")).unwrap();

    // nothing selected yet
    assert_eq!(session.select_product(1).unwrap_err(), PosError::NoTableSelected);
    let note = notifier.last().unwrap();
    assert_eq!(note.severity, Severity::Destructive);
    assert_eq!(note.title, "Kein Tisch ausgewählt");
    assert!(session.tables().iter().all(|t| t.status == TableStatus::Free));

    // Adana Kebap ×2, Ayran ×1, 10% off
    session.select_table("T1").unwrap();
    session.select_product(1).unwrap();
    session.select_product(1).unwrap();
    session.select_product(5).unwrap();
    assert_eq!(session.table("T1").unwrap().status, TableStatus::Occupied);

    let price = session.price_cart(&Discount::percent(Decimal::TEN)).rounded();
    assert_eq!(price.subtotal, Decimal::new(2700, 2));
    assert_eq!(price.total, Decimal::new(2430, 2));
    assert_eq!(price.tax, Decimal::new(462, 2));
    assert_eq!(price.net_amount, Decimal::new(1968, 2));

    let first = session
        .checkout(PaymentMethod::Cash, &Discount::percent(Decimal::TEN))
        .unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(first.total, Decimal::new(2430, 2));
    assert!(session.current_cart().is_empty());
    assert_eq!(session.table("T1").unwrap().status, TableStatus::Free);

    // second table, no discount
    session.select_table("T2").unwrap();
    session.select_product(8).unwrap();
    let second = session
        .checkout(PaymentMethod::Card, &Discount::none())
        .unwrap();
    assert!(second.id > first.id);

    session.set_order_status(first.id, OrderStatus::Served).unwrap();

    // everything survives a restart
    drop(session);
    let reopened = open_session(&db, &notifier);
    assert_eq!(reopened.tables().len(), 2);
    assert_eq!(reopened.tables()[0].name, "Fenster");
    assert_eq!(reopened.orders().len(), 2);
    assert_eq!(reopened.orders()[0].status, OrderStatus::Served);
    assert_eq!(reopened.orders()[0].discount, Decimal::new(270, 2));
    assert_eq!(reopened.next_order_id(), 3);
}

#[test]
fn test_clear_cart_frees_table() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pos.redb");
    let notifier = MemoryNotifier::new();
    let mut session = open_session(&db, &notifier);

    session.add_table(TableCreate::named("Tisch 1")).unwrap();
    session.select_table("T1").unwrap();
    session.select_product(3).unwrap();
    session.select_product(10).unwrap();

    session.clear_cart().unwrap();
    session.clear_cart().unwrap();

    assert!(session.current_cart().is_empty());
    assert_eq!(session.table("T1").unwrap().status, TableStatus::Free);
    assert_eq!(
        session.store().load_tables(OPERATOR).unwrap()[0].status,
        TableStatus::Free
    );
    assert_eq!(notifier.last().unwrap().title, "Warenkorb geleert");
}

#[test]
fn test_reserved_status_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pos.redb");
    let notifier = MemoryNotifier::new();
    {
        let mut session = open_session(&db, &notifier);
        session.add_table(TableCreate::named("Stammtisch")).unwrap();
        session.set_table_status("T1", TableStatus::Reserved).unwrap();
    }

    let session = open_session(&db, &notifier);
    assert_eq!(session.table("T1").unwrap().status, TableStatus::Reserved);
}

#[test]
fn test_order_ids_continue_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pos.redb");
    let notifier = MemoryNotifier::new();

    let mut last_id = 0;
    for _ in 0..3 {
        let mut session = open_session(&db, &notifier);
        if session.tables().is_empty() {
            session.add_table(TableCreate::named("Tisch 1")).unwrap();
        }
        session.select_table("T1").unwrap();
        session.select_product(2).unwrap();
        let order = session
            .checkout(PaymentMethod::Digital, &Discount::none())
            .unwrap();
        assert!(order.id > last_id);
        last_id = order.id;
    }
    assert_eq!(last_id, 3);
}
