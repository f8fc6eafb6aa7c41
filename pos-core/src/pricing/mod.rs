//! Pricing Engine Module
//!
//! Pure price calculation for carts. Re-derived from the cart and discount
//! inputs on every call; nothing is cached.

mod calculator;

pub use calculator::*;
