//! POS session
//!
//! Explicit state container for one operator at one terminal: tables, carts,
//! the active table and the order ledger, plus the store and notifier they
//! talk to. Single-threaded; every operation takes `&mut self`.
//!
//! # Consistency
//!
//! - Table creation and order insertion change local state only after the
//!   store accepted the write.
//! - Table status is local-first. A failed status write marks the table
//!   dirty and notifies the user; [`PosSession::sync_dirty_tables`] retries.
//!
//! # Notifications
//!
//! Every rejected operation emits the error's destructive notification.
//! Successful table creation, cart clearing, checkout, receipt printing and
//! Z reports emit an info notification.

use crate::cart::{CartBook, CartChange};
use crate::catalog::Catalog;
use crate::core::Config;
use crate::notify::Notifier;
use crate::orders::{OrderDraft, OrderLedger, build_order};
use crate::pricing::{self, DEFAULT_TAX_RATE, Discount, PriceBreakdown};
use crate::reports;
use crate::storage::PosStore;
use crate::tables::{StatusTransition, TableBoard};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    CartItem, DEFAULT_TABLE_CAPACITY, DailyReport, Dashboard, Order, OrderStatus, PaymentMethod,
    Table, TableCreate, TableStatus,
};
use shared::util::{business_date, now_millis};
use shared::{Notification, PosError, PosResult};
use std::collections::BTreeSet;

/// Per-session settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub operator_id: String,
    pub tax_rate: Decimal,
    pub default_table_capacity: u32,
}

impl SessionOptions {
    pub fn new(operator_id: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
            tax_rate: DEFAULT_TAX_RATE,
            default_table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            operator_id: config.operator_id.clone(),
            tax_rate: config.tax_rate(),
            default_table_capacity: config.default_table_capacity,
        }
    }
}

pub struct PosSession<S: PosStore, N: Notifier> {
    operator_id: String,
    /// Unique id of this session instance
    epoch: String,
    tax_rate: Decimal,
    default_table_capacity: u32,
    catalog: Catalog,
    tables: TableBoard,
    carts: CartBook,
    ledger: OrderLedger,
    active_table: Option<String>,
    /// Tables whose local status has not reached the store yet
    dirty_tables: BTreeSet<String>,
    store: S,
    notifier: N,
}

impl<S: PosStore, N: Notifier> std::fmt::Debug for PosSession<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosSession")
            .field("operator_id", &self.operator_id)
            .field("epoch", &self.epoch)
            .field("tables", &self.tables.tables().len())
            .field("orders", &self.ledger.len())
            .field("active_table", &self.active_table)
            .field("dirty_tables", &self.dirty_tables)
            .finish_non_exhaustive()
    }
}

impl<S: PosStore, N: Notifier> PosSession<S, N> {
    /// Load the operator's tables and orders and start a session
    ///
    /// Carts are not persisted; every table starts with an empty cart.
    pub fn load(store: S, notifier: N, catalog: Catalog, options: SessionOptions) -> PosResult<Self> {
        let loaded = store
            .load_tables(&options.operator_id)
            .and_then(|tables| Ok((tables, store.load_orders(&options.operator_id)?)));
        let (tables, orders) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!(operator_id = %options.operator_id, error = %e, "Failed to load session data");
                let err = PosError::from(e);
                notifier.notify(err.notification());
                return Err(err);
            }
        };

        let mut carts = CartBook::new();
        for table in &tables {
            carts.ensure(&table.id);
        }

        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(
            epoch = %epoch,
            operator_id = %options.operator_id,
            tables = tables.len(),
            orders = orders.len(),
            "PosSession loaded"
        );

        Ok(Self {
            operator_id: options.operator_id,
            epoch,
            tax_rate: options.tax_rate,
            default_table_capacity: options.default_table_capacity,
            catalog,
            tables: TableBoard::from_tables(tables),
            carts,
            ledger: OrderLedger::from_orders(orders),
            active_table: None,
            dirty_tables: BTreeSet::new(),
            store,
            notifier,
        })
    }

    // ========== Accessors ==========

    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tables(&self) -> &[Table] {
        self.tables.tables()
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.get(table_id)
    }

    pub fn orders(&self) -> &[Order] {
        self.ledger.orders()
    }

    /// Id the next successful checkout would get
    pub fn next_order_id(&self) -> u64 {
        self.ledger.next_id()
    }

    pub fn active_table_id(&self) -> Option<&str> {
        self.active_table.as_deref()
    }

    pub fn active_table(&self) -> Option<&Table> {
        self.active_table
            .as_deref()
            .and_then(|id| self.tables.get(id))
    }

    pub fn dirty_tables(&self) -> impl Iterator<Item = &str> {
        self.dirty_tables.iter().map(String::as_str)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Cart lines of a specific table
    pub fn cart(&self, table_id: &str) -> &[CartItem] {
        self.carts.items(table_id)
    }

    // ========== Tables ==========

    /// Make a table the target of cart operations
    pub fn select_table(&mut self, table_id: &str) -> PosResult<()> {
        if !self.tables.contains(table_id) {
            return self.reject(PosError::TableNotFound(table_id.to_string()));
        }
        self.carts.ensure(table_id);
        self.active_table = Some(table_id.to_string());
        tracing::debug!(table_id = %table_id, "Table selected");
        Ok(())
    }

    /// Create a table; it only appears locally once the store accepted it
    pub fn add_table(&mut self, input: TableCreate) -> PosResult<Table> {
        let table = match self.tables.prepare(&input, self.default_table_capacity) {
            Ok(table) => table,
            Err(e) => return self.reject(e),
        };

        if let Err(e) = self.store.insert_table(&self.operator_id, &table) {
            tracing::error!(table_id = %table.id, error = %e, "Failed to persist table");
            self.notifier.notify(Notification::destructive(
                "Fehler",
                "Tisch konnte nicht hinzugefügt werden.",
            ));
            return Err(e.into());
        }

        self.tables.insert(table.clone());
        self.carts.ensure(&table.id);
        tracing::info!(table_id = %table.id, name = %table.name, capacity = table.capacity, "Table added");
        self.notifier.notify(Notification::info(
            "Tisch hinzugefügt",
            format!("{} wurde erfolgreich hinzugefügt.", table.name),
        ));
        Ok(table)
    }

    /// Manual status toggle, the only way into or out of `Reserved`
    pub fn set_table_status(&mut self, table_id: &str, status: TableStatus) -> PosResult<()> {
        match self.tables.set_status(table_id, status) {
            Ok(transition) => {
                self.persist_transition(transition);
                Ok(())
            }
            Err(e) => self.reject(e),
        }
    }

    /// Retry status writes that failed earlier
    ///
    /// Returns the number of tables written. Tables still failing stay dirty
    /// and one destructive notification is sent for them.
    pub fn sync_dirty_tables(&mut self) -> usize {
        let pending: Vec<String> = self.dirty_tables.iter().cloned().collect();
        let mut synced = 0;

        for table_id in pending {
            let Some(status) = self.tables.get(&table_id).map(|t| t.status) else {
                self.dirty_tables.remove(&table_id);
                continue;
            };
            match self
                .store
                .update_table_status(&self.operator_id, &table_id, status)
            {
                Ok(()) => {
                    self.dirty_tables.remove(&table_id);
                    synced += 1;
                }
                Err(e) => {
                    tracing::warn!(table_id = %table_id, error = %e, "Table status still not persisted");
                }
            }
        }

        if synced > 0 {
            tracing::info!(synced, remaining = self.dirty_tables.len(), "Dirty tables synced");
        }
        if !self.dirty_tables.is_empty() {
            self.notify_status_not_saved();
        }
        synced
    }

    // ========== Cart ==========

    /// Add one unit of a catalog product to the active table's cart
    pub fn select_product(&mut self, product_id: i64) -> PosResult<CartChange> {
        let result = self.try_select_product(product_id);
        self.report(result)
    }

    fn try_select_product(&mut self, product_id: i64) -> PosResult<CartChange> {
        let table_id = self.require_active_table()?;
        let product = self
            .catalog
            .find(product_id)
            .ok_or(PosError::ProductNotFound(product_id))?;
        if !product.available {
            return Err(PosError::ProductUnavailable(product.name.clone()));
        }

        let change = self.carts.select_product(&table_id, product);
        let transition = self.tables.on_cart_populated(&table_id)?;
        self.persist_transition(transition);
        Ok(change)
    }

    /// Set a line's quantity; values below 1 are stored as 1
    pub fn change_quantity(&mut self, item_id: i64, quantity: i64) -> PosResult<u32> {
        let result = self
            .require_active_table()
            .and_then(|table_id| self.carts.change_quantity(&table_id, item_id, quantity));
        self.report(result)
    }

    pub fn increment_item(&mut self, item_id: i64) -> PosResult<u32> {
        let result = self
            .require_active_table()
            .and_then(|table_id| self.carts.increment(&table_id, item_id));
        self.report(result)
    }

    pub fn decrement_item(&mut self, item_id: i64) -> PosResult<u32> {
        let result = self
            .require_active_table()
            .and_then(|table_id| self.carts.decrement(&table_id, item_id));
        self.report(result)
    }

    /// Drop a line regardless of its quantity; the table keeps its status
    pub fn remove_item(&mut self, item_id: i64) -> PosResult<CartItem> {
        let result = self
            .require_active_table()
            .and_then(|table_id| self.carts.remove_item(&table_id, item_id));
        self.report(result)
    }

    /// Empty the active table's cart and free the table
    ///
    /// Idempotent: clearing an empty cart still reports success.
    pub fn clear_cart(&mut self) -> PosResult<()> {
        let result = self.try_clear_cart();
        self.report(result)?;
        self.notifier.notify(Notification::info(
            "Warenkorb geleert",
            "Alle Artikel wurden entfernt.",
        ));
        Ok(())
    }

    fn try_clear_cart(&mut self) -> PosResult<()> {
        let table_id = self.require_active_table()?;
        let removed = self.carts.clear(&table_id);
        let transition = self.tables.on_cart_cleared(&table_id)?;
        self.persist_transition(transition);
        tracing::info!(table_id = %table_id, lines = removed.len(), "Cart cleared");
        Ok(())
    }

    /// Lines of the active table's cart, empty without an active table
    pub fn current_cart(&self) -> &[CartItem] {
        self.active_table
            .as_deref()
            .map(|id| self.carts.items(id))
            .unwrap_or(&[])
    }

    /// Price breakdown of the active table's cart
    pub fn price_cart(&self, discount: &Discount) -> PriceBreakdown {
        pricing::calculate(self.current_cart(), discount, self.tax_rate)
    }

    // ========== Checkout ==========

    /// Turn the active table's cart into an order
    ///
    /// The order id is consumed even if the store rejects the order; on
    /// failure the cart and table stay as they were.
    pub fn checkout(&mut self, payment_method: PaymentMethod, discount: &Discount) -> PosResult<Order> {
        self.checkout_for(payment_method, discount, None)
    }

    /// [`checkout`](Self::checkout) with a customer name on the order
    pub fn checkout_for(
        &mut self,
        payment_method: PaymentMethod,
        discount: &Discount,
        customer_name: Option<String>,
    ) -> PosResult<Order> {
        let table_id = match self.require_active_table() {
            Ok(id) => id,
            Err(e) => return self.reject(e),
        };
        if self.carts.is_empty(&table_id) {
            return self.reject(PosError::EmptyCart(table_id));
        }

        let items = self.carts.items(&table_id);
        let pricing = pricing::calculate(items, discount, self.tax_rate);
        let order_id = self.ledger.advance();
        let order = build_order(
            order_id,
            OrderDraft {
                table_id: &table_id,
                items,
                pricing: &pricing,
                payment_method,
                customer_name,
            },
            now_millis(),
        );

        if let Err(e) = self.store.insert_order(&self.operator_id, &order) {
            tracing::error!(order_id, table_id = %table_id, error = %e, "Failed to persist order");
            self.notifier.notify(Notification::destructive(
                "Fehler",
                "Bestellung konnte nicht abgeschlossen werden.",
            ));
            return Err(e.into());
        }

        self.ledger.append(order.clone());
        self.carts.clear(&table_id);
        match self.tables.on_cart_cleared(&table_id) {
            Ok(transition) => self.persist_transition(transition),
            Err(e) => tracing::warn!(table_id = %table_id, error = %e, "Checked out table vanished"),
        }

        tracing::info!(
            order_id,
            table_id = %table_id,
            total = %order.total,
            payment_method = %payment_method,
            "Order checked out"
        );
        self.notifier.notify(Notification::info(
            "Bestellung abgeschlossen",
            format!("Bestellung #{} wurde erfolgreich kassiert.", order_id),
        ));
        Ok(order)
    }

    /// Announce a receipt print; no device is driven
    pub fn print_receipt(&self) {
        tracing::info!(table_id = ?self.active_table, "Receipt print requested");
        self.notifier.notify(Notification::info(
            "Bon wird gedruckt",
            "Der Bon wird an den Drucker gesendet.",
        ));
    }

    // ========== Orders ==========

    /// Externally driven order status change (kitchen display, service)
    pub fn set_order_status(&mut self, order_id: u64, status: OrderStatus) -> PosResult<()> {
        if self.ledger.get(order_id).is_none() {
            return self.reject(PosError::OrderNotFound(order_id));
        }

        let updated_at = now_millis();
        if let Err(e) = self
            .store
            .update_order_status(&self.operator_id, order_id, status, updated_at)
        {
            tracing::error!(order_id, status = ?status, error = %e, "Failed to persist order status");
            return self.reject(e.into());
        }

        let result = self.ledger.set_status(order_id, status, updated_at).map(|_| ());
        self.report(result)
    }

    // ========== Reports ==========

    /// Today's revenue and the table overview
    pub fn dashboard(&self) -> Dashboard {
        reports::dashboard(
            self.ledger.orders(),
            self.tables.status_counts(),
            business_date(now_millis()),
        )
    }

    pub fn daily_report(&self, date: NaiveDate) -> DailyReport {
        reports::daily_report(self.ledger.orders(), date, self.tax_rate)
    }

    /// End-of-day report, announced through the notifier
    pub fn z_report(&self, date: NaiveDate) -> DailyReport {
        let report = self.daily_report(date);
        tracing::info!(
            date = %report.date,
            total_sales = %report.total_sales,
            order_count = report.order_count,
            "Z report created"
        );
        self.notifier.notify(Notification::info(
            "Z-Bericht erstellt",
            format!(
                "Tagesumsatz: €{:.2} | {} Bestellungen",
                report.total_sales, report.order_count
            ),
        ));
        report
    }

    // ========== Internals ==========

    fn require_active_table(&self) -> PosResult<String> {
        self.active_table.clone().ok_or(PosError::NoTableSelected)
    }

    /// Write a status change to the store, marking the table dirty on failure
    fn persist_transition(&mut self, transition: Option<StatusTransition>) {
        let Some(StatusTransition { table_id, from, to }) = transition else {
            return;
        };
        tracing::info!(table_id = %table_id, from = %from, to = %to, "Table status changed");

        match self
            .store
            .update_table_status(&self.operator_id, &table_id, to)
        {
            Ok(()) => {
                self.dirty_tables.remove(&table_id);
            }
            Err(e) => {
                tracing::warn!(table_id = %table_id, status = %to, error = %e, "Table status not persisted, marked dirty");
                self.dirty_tables.insert(table_id);
                self.notify_status_not_saved();
            }
        }
    }

    fn notify_status_not_saved(&self) {
        self.notifier.notify(Notification::destructive(
            "Fehler",
            "Tischstatus konnte nicht gespeichert werden.",
        ));
    }

    fn reject<T>(&self, err: PosError) -> PosResult<T> {
        tracing::debug!(error = %err, code = ?err.code(), "Operation rejected");
        self.notifier.notify(err.notification());
        Err(err)
    }

    fn report<T>(&self, result: PosResult<T>) -> PosResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => self.reject(e),
        }
    }
}

#[cfg(test)]
mod tests;
