//! Order totals for checkout.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::Cart;
use crate::types::round_money;

/// Sales tax applied to the subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Subtotal, shipping, tax and grand total, each rounded to cents.
///
/// Tax and total are both derived from the unrounded subtotal rather than
/// from each other, so `total` is always `round(subtotal * 1.10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub item_count: u32,
}

impl CheckoutSummary {
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let subtotal = cart.cart_total();
        Self {
            subtotal: round_money(subtotal),
            shipping: round_money(Decimal::ZERO),
            tax: round_money(subtotal * TAX_RATE),
            total: round_money(subtotal * (Decimal::ONE + TAX_RATE)),
            item_count: cart.item_count(),
        }
    }
}
