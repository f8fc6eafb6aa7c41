//! Cart Item Model

use super::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A menu item in a table's cart
///
/// `quantity` is at least 1 for every line held in a cart; removing a line
/// is a separate action from lowering its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    /// New cart line with quantity 1
    pub fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    /// Menu item id of this line
    pub fn id(&self) -> i64 {
        self.item.id
    }

    /// price × quantity
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}
