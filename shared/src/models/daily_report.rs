//! Daily Report Model (Tagesabschluss)

use super::PaymentMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payment method breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodSummary {
    pub amount: Decimal,
    pub count: u64,
}

/// Best-selling item of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub item: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

/// Daily Report - end-of-day settlement report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Business date (YYYY-MM-DD)
    pub date: String,
    pub total_sales: Decimal,
    pub order_count: u64,
    pub average_order: Decimal,
    /// Net amount (total minus backed-out tax)
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub payment_methods: BTreeMap<PaymentMethod, PaymentMethodSummary>,
    pub top_items: Vec<TopItem>,
}

/// Live overview for the dashboard page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub revenue: Decimal,
    pub order_count: u64,
    pub free_tables: usize,
    pub occupied_tables: usize,
    pub reserved_tables: usize,
}
