use crate::pricing::PriceBreakdown;
use shared::models::{CartItem, Order, OrderStatus, PaymentMethod, Platform};
use shared::{PosError, PosResult};

/// Inputs for a new order taken at checkout
#[derive(Debug, Clone)]
pub struct OrderDraft<'a> {
    pub table_id: &'a str,
    pub items: &'a [CartItem],
    pub pricing: &'a PriceBreakdown,
    pub payment_method: PaymentMethod,
    pub customer_name: Option<String>,
}

/// Snapshot the cart and its pricing into a kitchen-bound POS order
pub fn build_order(id: u64, draft: OrderDraft<'_>, now: i64) -> Order {
    Order {
        id,
        table_id: Some(draft.table_id.to_string()),
        items: draft.items.to_vec(),
        subtotal: draft.pricing.subtotal,
        discount: draft.pricing.discount_value,
        total: draft.pricing.total,
        status: OrderStatus::Kitchen,
        platform: Platform::Pos,
        customer_name: draft.customer_name,
        payment_method: Some(draft.payment_method),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Debug, Clone)]
pub struct OrderLedger {
    orders: Vec<Order>,
    next_id: u64,
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            next_id: 1,
        }
    }
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the ledger from persisted orders
    ///
    /// Orders are kept sorted by id; the counter starts one past the highest id.
    pub fn from_orders(mut orders: Vec<Order>) -> Self {
        orders.sort_by_key(|o| o.id);
        let next_id = orders.last().map(|o| o.id + 1).unwrap_or(1);
        Self { orders, next_id }
    }

    /// Id the next checkout will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Reserve the next id
    pub fn advance(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn append(&mut self, order: Order) {
        if order.id >= self.next_id {
            self.next_id = order.id + 1;
        }
        self.orders.push(order);
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Externally driven status change; any status may follow any other
    pub fn set_status(&mut self, id: u64, status: OrderStatus, updated_at: i64) -> PosResult<&Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(PosError::OrderNotFound(id))?;
        order.status = status;
        order.updated_at = updated_at;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{DEFAULT_TAX_RATE, Discount, calculate};
    use rust_decimal::Decimal;
    use shared::models::MenuItem;

    fn cart() -> Vec<CartItem> {
        let mut kebap = CartItem::new(MenuItem::new(
            1,
            "Adana Kebap",
            Decimal::new(1250, 2),
            "Hauptgerichte",
        ));
        kebap.quantity = 2;
        vec![kebap]
    }

    fn order(id: u64) -> Order {
        let items = cart();
        let pricing = calculate(&items, &Discount::none(), DEFAULT_TAX_RATE);
        build_order(
            id,
            OrderDraft {
                table_id: "T1",
                items: &items,
                pricing: &pricing,
                payment_method: PaymentMethod::Cash,
                customer_name: None,
            },
            1_700_000_000_000,
        )
    }

    #[test]
    fn test_build_order_snapshot() {
        let items = cart();
        let pricing = calculate(&items, &Discount::amount(Decimal::new(500, 2)), DEFAULT_TAX_RATE);
        let order = build_order(
            7,
            OrderDraft {
                table_id: "T3",
                items: &items,
                pricing: &pricing,
                payment_method: PaymentMethod::Card,
                customer_name: Some("Müller".to_string()),
            },
            42,
        );

        assert_eq!(order.id, 7);
        assert_eq!(order.table_id.as_deref(), Some("T3"));
        assert_eq!(order.status, OrderStatus::Kitchen);
        assert_eq!(order.platform, Platform::Pos);
        assert_eq!(order.subtotal, Decimal::new(2500, 2));
        assert_eq!(order.discount, Decimal::new(500, 2));
        assert_eq!(order.total, Decimal::new(2000, 2));
        assert_eq!(order.payment_method, Some(PaymentMethod::Card));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.created_at, 42);
        assert_eq!(order.updated_at, 42);
    }

    #[test]
    fn test_empty_ledger_starts_at_one() {
        let mut ledger = OrderLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.next_id(), 1);
        assert_eq!(ledger.advance(), 1);
        assert_eq!(ledger.advance(), 2);
        assert_eq!(ledger.next_id(), 3);
    }

    #[test]
    fn test_from_orders_seeds_counter() {
        let ledger = OrderLedger::from_orders(vec![order(5), order(2), order(9)]);
        assert_eq!(ledger.next_id(), 10);
        let ids: Vec<u64> = ledger.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_ids_strictly_increase_with_gaps() {
        let mut ledger = OrderLedger::new();
        let first = ledger.advance();
        ledger.append(order(first));
        // a failed write burns an id
        let _burned = ledger.advance();
        let third = ledger.advance();
        ledger.append(order(third));

        let ids: Vec<u64> = ledger.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ledger.next_id(), 4);
    }

    #[test]
    fn test_set_status() {
        let mut ledger = OrderLedger::from_orders(vec![order(1)]);

        let updated = ledger
            .set_status(1, OrderStatus::Served, 1_700_000_060_000)
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Served);
        assert_eq!(updated.updated_at, 1_700_000_060_000);
        assert_eq!(updated.created_at, 1_700_000_000_000);

        // no transition rules
        ledger
            .set_status(1, OrderStatus::Pending, 1_700_000_120_000)
            .unwrap();
        assert_eq!(ledger.get(1).unwrap().status, OrderStatus::Pending);

        assert_eq!(
            ledger.set_status(99, OrderStatus::Paid, 0).unwrap_err(),
            PosError::OrderNotFound(99)
        );
    }
}
