use anyhow::Context;
use pos_core::{Catalog, PosSession, RedbStore, SessionOptions, TracingNotifier, setup_environment};
use shared::util::{business_date, now_millis};

fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    let config = setup_environment().context("failed to prepare work dir")?;
    tracing::info!(work_dir = %config.work_dir, operator_id = %config.operator_id, "POS starting");

    // 2. Catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::sample(),
    };

    // 3. Store + session
    let db_path = config.database_path();
    let store = RedbStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    let session = PosSession::load(
        store,
        TracingNotifier,
        catalog,
        SessionOptions::from_config(&config),
    )?;

    let dashboard = session.dashboard();
    tracing::info!(
        tables = session.tables().len(),
        orders = session.orders().len(),
        next_order_id = session.next_order_id(),
        free = dashboard.free_tables,
        occupied = dashboard.occupied_tables,
        reserved = dashboard.reserved_tables,
        revenue = %dashboard.revenue,
        "Session ready"
    );

    // 4. Today's report on stdout
    let report = session.daily_report(business_date(now_millis()));
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
