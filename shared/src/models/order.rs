//! Order Model

use super::CartItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// Checkout creates orders in `Kitchen`; every other value is set from
/// outside the core and no transition rules are enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Kitchen,
    Ready,
    Served,
    Paid,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Offen",
            Self::Kitchen => "Küche",
            Self::Ready => "Fertig",
            Self::Served => "Serviert",
            Self::Paid => "Bezahlt",
        }
    }
}

/// Sales channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Pos,
    Delivery,
    Online,
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Digital,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Cash, Self::Card, Self::Digital];

    /// German display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Bar",
            Self::Card => "Karte",
            Self::Digital => "Digital",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Digital => "digital",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed checkout (Bestellung)
///
/// Immutable once created except for `status` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Sequential order number, never reused
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Cart snapshot at checkout time
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    /// Applied discount value in currency unit
    pub discount: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

impl Order {
    /// Total number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
