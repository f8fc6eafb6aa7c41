use super::*;

fn checkout_one(session: &mut TestSession<'_>, table: &str, product: i64, method: PaymentMethod) {
    session.select_table(table).unwrap();
    session.select_product(product).unwrap();
    session.checkout(method, &Discount::none()).unwrap();
}

#[test]
fn test_z_report_for_today() {
    let store = FlakyStore::default();
    let notifier = MemoryNotifier::new();
    let mut session = session_with_tables(&store, &notifier);
    checkout_one(&mut session, "T1", 1, PaymentMethod::Cash);
    checkout_one(&mut session, "T2", 9, PaymentMethod::Card);

    let today = business_date(now_millis());
    let report = session.z_report(today);

    assert_eq!(report.order_count, 2);
    assert_eq!(report.total_sales, dec("23.00"));
    assert_eq!(report.average_order, dec("11.50"));
    assert_eq!(report.tax_amount, dec("4.37"));
    assert_eq!(report.payment_methods[&PaymentMethod::Cash].count, 1);

    let note = notifier.last().unwrap();
    assert_eq!(note.title, "Z-Bericht erstellt");
    assert_eq!(note.description, "Tagesumsatz: €23.00 | 2 Bestellungen");
}

#[test]
fn test_z_report_empty_day() {
    let store = FlakyStore::default();
    let notifier = MemoryNotifier::new();
    let session = session_with_tables(&store, &notifier);

    let report = session.z_report(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(report.order_count, 0);
    assert_eq!(
        notifier.last().unwrap().description,
        "Tagesumsatz: €0.00 | 0 Bestellungen"
    );
}

#[test]
fn test_dashboard_revenue() {
    let store = FlakyStore::default();
    let notifier = MemoryNotifier::new();
    let mut session = session_with_tables(&store, &notifier);
    checkout_one(&mut session, "T1", 7, PaymentMethod::Digital);

    let dashboard = session.dashboard();
    assert_eq!(dashboard.revenue, dec("4.50"));
    assert_eq!(dashboard.order_count, 1);
    assert_eq!(dashboard.free_tables, 2);
}
