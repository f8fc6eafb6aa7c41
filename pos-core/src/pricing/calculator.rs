//! Cart Price Calculator
//!
//! subtotal → discount → total → tax backed out of the total.
//! Uses rust_decimal throughout; rounding happens only for display.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::CartItem;

/// Rounding for display (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Standard German VAT rate (19% MwSt)
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Manual discount inputs for a cart
///
/// The two modes are not additive: the larger resulting amount wins.
/// Inputs are not validated here; the input widgets bound them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Percentage of the subtotal (0-100)
    pub percent: Decimal,
    /// Flat amount in currency unit
    pub amount: Decimal,
}

impl Discount {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn percent(percent: Decimal) -> Self {
        Self {
            percent,
            amount: Decimal::ZERO,
        }
    }

    pub fn amount(amount: Decimal) -> Self {
        Self {
            percent: Decimal::ZERO,
            amount,
        }
    }
}

/// Result of a cart price calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Σ price × quantity
    pub subtotal: Decimal,
    /// max(percent-derived, flat)
    pub discount_value: Decimal,
    /// max(0, subtotal - discount_value), tax inclusive
    pub total: Decimal,
    /// total × tax rate
    pub tax: Decimal,
    /// total - tax
    pub net_amount: Decimal,
}

impl PriceBreakdown {
    /// Whether the discount line should be shown
    pub fn shows_discount(&self) -> bool {
        self.discount_value > Decimal::ZERO
    }

    /// All values rounded to 2 decimal places for display
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_money(self.subtotal),
            discount_value: round_money(self.discount_value),
            total: round_money(self.total),
            tax: round_money(self.tax),
            net_amount: round_money(self.net_amount),
        }
    }
}

/// Round a monetary value to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax rate from a whole percentage (e.g. 19 → 0.19)
pub fn tax_rate_from_percent(percent: u32) -> Decimal {
    Decimal::from(percent) / Decimal::ONE_HUNDRED
}

/// Sum of all line totals
pub fn subtotal(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

/// Discount amount for a subtotal: the larger of percentage and flat amount
pub fn discount_value(subtotal: Decimal, discount: &Discount) -> Decimal {
    let by_percent = subtotal * discount.percent / Decimal::ONE_HUNDRED;
    by_percent.max(discount.amount)
}

/// Calculate the price breakdown for a cart
///
/// # Calculation Steps
/// 1. subtotal = Σ price × quantity
/// 2. discount_value = max(subtotal × percent / 100, amount)
/// 3. total = max(0, subtotal - discount_value)
/// 4. tax = total × tax_rate, net_amount = total - tax
///
/// An empty cart yields all zeros regardless of the discount inputs.
pub fn calculate(items: &[CartItem], discount: &Discount, tax_rate: Decimal) -> PriceBreakdown {
    if items.is_empty() {
        return PriceBreakdown::default();
    }

    let subtotal = subtotal(items);
    let discount_value = discount_value(subtotal, discount);
    let total = (subtotal - discount_value).max(Decimal::ZERO);

    // Prices are tax inclusive: the tax share is backed out, not added
    let tax = total * tax_rate;
    let net_amount = total - tax;

    PriceBreakdown {
        subtotal,
        discount_value,
        total,
        tax,
        net_amount,
    }
}
