//! Cart State Manager
//!
//! Per-table carts keyed by table id. Lines keep the order in which their
//! products were first added. Quantities never drop below 1 here; taking a
//! line out of a cart is always an explicit `remove_item`.

use shared::models::{CartItem, MenuItem};
use shared::{PosError, PosResult};
use std::collections::HashMap;

/// Lowest quantity a cart line can hold
pub const MIN_QUANTITY: u32 = 1;

/// Outcome of a product selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// New line appended with quantity 1
    Added,
    /// Existing line bumped to `quantity`
    Incremented { quantity: u32 },
}

/// Carts for all tables of a session
#[derive(Debug, Clone, Default)]
pub struct CartBook {
    carts: HashMap<String, Vec<CartItem>>,
}

impl CartBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a (possibly empty) cart exists for the table
    pub fn ensure(&mut self, table_id: &str) {
        self.carts.entry(table_id.to_string()).or_default();
    }

    /// Lines of a table's cart, empty if the table has none
    pub fn items(&self, table_id: &str) -> &[CartItem] {
        self.carts.get(table_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self, table_id: &str) -> bool {
        self.items(table_id).is_empty()
    }

    /// Add one unit of `product` to the table's cart
    pub fn select_product(&mut self, table_id: &str, product: &MenuItem) -> CartChange {
        let cart = self.carts.entry(table_id.to_string()).or_default();
        match cart.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => {
                line.quantity = clamp_quantity(i64::from(line.quantity) + 1);
                CartChange::Incremented {
                    quantity: line.quantity,
                }
            }
            None => {
                cart.push(CartItem::new(product.clone()));
                CartChange::Added
            }
        }
    }

    /// Set a line's quantity, clamped to at least [`MIN_QUANTITY`]
    ///
    /// Returns the stored quantity.
    pub fn change_quantity(&mut self, table_id: &str, item_id: i64, quantity: i64) -> PosResult<u32> {
        let stored = clamp_quantity(quantity);
        let line = self.line_mut(table_id, item_id)?;
        line.quantity = stored;
        Ok(stored)
    }

    /// The "+" control
    pub fn increment(&mut self, table_id: &str, item_id: i64) -> PosResult<u32> {
        let current = self.line_mut(table_id, item_id)?.quantity;
        self.change_quantity(table_id, item_id, i64::from(current) + 1)
    }

    /// The "−" control; floors at [`MIN_QUANTITY`]
    pub fn decrement(&mut self, table_id: &str, item_id: i64) -> PosResult<u32> {
        let current = self.line_mut(table_id, item_id)?.quantity;
        self.change_quantity(table_id, item_id, i64::from(current) - 1)
    }

    /// Drop a line regardless of its quantity
    pub fn remove_item(&mut self, table_id: &str, item_id: i64) -> PosResult<CartItem> {
        let cart = self
            .carts
            .get_mut(table_id)
            .ok_or_else(|| item_not_found(table_id, item_id))?;
        let index = cart
            .iter()
            .position(|line| line.id() == item_id)
            .ok_or_else(|| item_not_found(table_id, item_id))?;
        Ok(cart.remove(index))
    }

    /// Empty the table's cart, returning the removed lines
    pub fn clear(&mut self, table_id: &str) -> Vec<CartItem> {
        self.carts
            .get_mut(table_id)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn line_mut(&mut self, table_id: &str, item_id: i64) -> PosResult<&mut CartItem> {
        self.carts
            .get_mut(table_id)
            .and_then(|cart| cart.iter_mut().find(|line| line.id() == item_id))
            .ok_or_else(|| item_not_found(table_id, item_id))
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(i64::from(MIN_QUANTITY), i64::from(u32::MAX)) as u32
}

fn item_not_found(table_id: &str, item_id: i64) -> PosError {
    PosError::ItemNotFound {
        table_id: table_id.to_string(),
        item_id,
    }
}
