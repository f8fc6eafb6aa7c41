//! Daily reports and dashboard figures
//!
//! All figures are derived from the order ledger on demand. An order belongs
//! to the business date of its `created_at` (UTC).

use crate::pricing::round_money;
use crate::tables::StatusCounts;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{DailyReport, Dashboard, Order, PaymentMethod, PaymentMethodSummary, TopItem};
use shared::util::business_date;
use std::collections::{BTreeMap, HashMap};

/// Number of best sellers listed in a daily report
pub const TOP_ITEMS_LIMIT: usize = 5;

fn orders_on(orders: &[Order], date: NaiveDate) -> impl Iterator<Item = &Order> {
    orders
        .iter()
        .filter(move |order| business_date(order.created_at) == date)
}

/// Build the end-of-day report for one business date
///
/// Every payment method is listed, including those without orders.
pub fn daily_report(orders: &[Order], date: NaiveDate, tax_rate: Decimal) -> DailyReport {
    let mut total_sales = Decimal::ZERO;
    let mut order_count = 0u64;
    let mut payment_methods: BTreeMap<PaymentMethod, PaymentMethodSummary> = PaymentMethod::ALL
        .into_iter()
        .map(|method| (method, PaymentMethodSummary::default()))
        .collect();
    let mut items: HashMap<&str, (u64, Decimal)> = HashMap::new();

    for order in orders_on(orders, date) {
        total_sales += order.total;
        order_count += 1;

        if let Some(method) = order.payment_method {
            let summary = payment_methods.entry(method).or_default();
            summary.amount += order.total;
            summary.count += 1;
        }

        for line in &order.items {
            let entry = items.entry(line.item.name.as_str()).or_default();
            entry.0 += u64::from(line.quantity);
            entry.1 += line.line_total();
        }
    }

    let average_order = if order_count > 0 {
        total_sales / Decimal::from(order_count)
    } else {
        Decimal::ZERO
    };
    let tax_amount = total_sales * tax_rate;

    for summary in payment_methods.values_mut() {
        summary.amount = round_money(summary.amount);
    }

    DailyReport {
        date: date.format("%Y-%m-%d").to_string(),
        total_sales: round_money(total_sales),
        order_count,
        average_order: round_money(average_order),
        taxable_amount: round_money(total_sales - tax_amount),
        tax_amount: round_money(tax_amount),
        payment_methods,
        top_items: top_items(items),
    }
}

fn top_items(items: HashMap<&str, (u64, Decimal)>) -> Vec<TopItem> {
    let mut ranked: Vec<TopItem> = items
        .into_iter()
        .map(|(name, (quantity, revenue))| TopItem {
            item: name.to_string(),
            quantity,
            revenue: round_money(revenue),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| b.revenue.cmp(&a.revenue))
            .then_with(|| a.item.cmp(&b.item))
    });
    ranked.truncate(TOP_ITEMS_LIMIT);
    ranked
}

/// Revenue and order count of one business date plus the table overview
pub fn dashboard(orders: &[Order], tables: StatusCounts, date: NaiveDate) -> Dashboard {
    let (revenue, order_count) = orders_on(orders, date)
        .fold((Decimal::ZERO, 0u64), |(sum, count), order| {
            (sum + order.total, count + 1)
        });

    Dashboard {
        revenue: round_money(revenue),
        order_count,
        free_tables: tables.free,
        occupied_tables: tables.occupied,
        reserved_tables: tables.reserved,
    }
}
