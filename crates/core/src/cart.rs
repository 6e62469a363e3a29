//! Shopping cart aggregation.
//!
//! A [`Cart`] is a plain value. Every transition consumes the cart and hands
//! back the updated one. On error the consumed cart is dropped, so a caller
//! that needs the previous state keeps its own copy; the storefront reloads
//! it from the visitor's session.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductSnapshot};
use crate::types::{ProductId, sum_money};

/// Upper bound on the quantity of a single cart line.
pub const MAX_LINE_QUANTITY: u32 = 10;

/// Errors returned by cart transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
    #[error("a size must be selected for product {0}")]
    SizeRequired(ProductId),
    #[error("size {size:?} is not available for product {product_id}")]
    UnknownSize { product_id: ProductId, size: String },
    #[error("color {color:?} is not available for product {product_id}")]
    UnknownColor {
        product_id: ProductId,
        color: String,
    },
    #[error("cart has no line for {0}")]
    LineNotFound(LineKey),
}

/// Identity of a cart line: the product plus the chosen variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: ProductId,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl LineKey {
    /// Build a key, treating blank variant values as "not selected".
    #[must_use]
    pub fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size: normalize_variant(size),
            color: normalize_variant(color),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "product {} (size {}, color {})",
            self.product_id,
            self.size.as_deref().unwrap_or("-"),
            self.color.as_deref().unwrap_or("-"),
        )
    }
}

fn normalize_variant(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One product variant in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartLine {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Effective unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.pricing.effective() * Decimal::from(self.quantity)
    }
}

/// Ordered cart lines, at most one per [`LineKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Add `quantity` of a product variant.
    ///
    /// An existing line with the same product, size and color is incremented;
    /// otherwise a new line is appended. Either way the line is capped at
    /// [`MAX_LINE_QUANTITY`]. The stored snapshot is refreshed from `product`.
    ///
    /// A product with listed colors defaults to its first color when none is
    /// chosen.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity <= 0`,
    /// `CartError::SizeRequired` if the product lists sizes and none is
    /// chosen, or an `UnknownSize`/`UnknownColor` error if the selection is
    /// not among the listed variants.
    pub fn add_line(
        mut self,
        product: &Product,
        quantity: i64,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<Self, CartError> {
        let quantity = checked_quantity(quantity)?;
        let mut key = LineKey::new(product.id, size, color);
        if key.color.is_none() {
            key.color = product.colors.first().cloned();
        }
        validate_variant(product, &key)?;

        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = line
                .quantity
                .saturating_add(quantity)
                .min(MAX_LINE_QUANTITY);
            line.product = product.snapshot();
        } else {
            self.lines.push(CartLine {
                product: product.snapshot(),
                quantity,
                size: key.size,
                color: key.color,
            });
        }
        Ok(self)
    }

    /// Remove the single line matching `key`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line matches.
    pub fn remove_line(mut self, key: &LineKey) -> Result<Self, CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(key));
        if self.lines.len() == before {
            return Err(CartError::LineNotFound(key.clone()));
        }
        Ok(self)
    }

    /// Remove every line for a product, whatever the variant.
    #[must_use]
    pub fn remove_product(mut self, product_id: ProductId) -> Self {
        self.lines.retain(|line| line.product.id != product_id);
        self
    }

    /// Replace the quantity of an existing line, capped at
    /// [`MAX_LINE_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity <= 0` and
    /// `CartError::LineNotFound` if no line matches.
    pub fn set_quantity(mut self, key: &LineKey, quantity: i64) -> Result<Self, CartError> {
        let quantity = checked_quantity(quantity)?;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.matches(key))
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        line.quantity = quantity;
        Ok(self)
    }

    #[must_use]
    pub fn clear(self) -> Self {
        Self::default()
    }

    /// Sum of line totals, unrounded.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        sum_money(self.lines.iter().map(CartLine::line_total))
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

fn checked_quantity(quantity: i64) -> Result<u32, CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    let capped = quantity.min(i64::from(MAX_LINE_QUANTITY));
    Ok(u32::try_from(capped).unwrap_or(MAX_LINE_QUANTITY))
}

fn validate_variant(product: &Product, key: &LineKey) -> Result<(), CartError> {
    if key.size.is_none() && !product.sizes.is_empty() {
        return Err(CartError::SizeRequired(product.id));
    }
    if let Some(size) = &key.size {
        if !product.sizes.is_empty() && !product.offers_size(size) {
            return Err(CartError::UnknownSize {
                product_id: product.id,
                size: size.clone(),
            });
        }
    }
    if let Some(color) = &key.color {
        if !product.colors.is_empty() && !product.offers_color(color) {
            return Err(CartError::UnknownColor {
                product_id: product.id,
                color: color.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    fn sneaker() -> Product {
        let mut p = product(1, 120, None);
        p.sizes = vec!["8".to_string(), "9".to_string()];
        p.colors = vec!["black".to_string(), "white".to_string()];
        p
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_same_variant_merges_into_one_line() {
        let p = sneaker();
        let cart = Cart::new()
            .add_line(&p, 2, some("8"), some("black"))
            .unwrap()
            .add_line(&p, 3, some("8"), some("black"))
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_different_sizes_are_separate_lines() {
        let p = sneaker();
        let cart = Cart::new()
            .add_line(&p, 1, some("8"), some("black"))
            .unwrap()
            .add_line(&p, 1, some("9"), some("black"))
            .unwrap();
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_caps_line_quantity() {
        let p = sneaker();
        let cart = Cart::new()
            .add_line(&p, 7, some("8"), None)
            .unwrap()
            .add_line(&p, 6, some("8"), None)
            .unwrap();
        assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);

        let cart = Cart::new().add_line(&p, 25, some("9"), None).unwrap();
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let p = sneaker();
        assert_eq!(
            Cart::new().add_line(&p, 0, None, None),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(
            Cart::new().add_line(&p, -2, None, None),
            Err(CartError::InvalidQuantity(-2))
        );
    }

    #[test]
    fn test_add_rejects_unlisted_variants() {
        let p = sneaker();
        assert!(matches!(
            Cart::new().add_line(&p, 1, some("14"), None),
            Err(CartError::UnknownSize { .. })
        ));
        assert!(matches!(
            Cart::new().add_line(&p, 1, some("8"), some("green")),
            Err(CartError::UnknownColor { .. })
        ));

        // Products without declared variants accept any selection.
        let plain = product(2, 40, None);
        assert!(Cart::new().add_line(&plain, 1, some("one-size"), None).is_ok());
    }

    #[test]
    fn test_blank_variant_is_no_selection() {
        let plain = product(2, 40, None);
        let cart = Cart::new()
            .add_line(&plain, 1, some("  "), None)
            .unwrap()
            .add_line(&plain, 1, None, some(""))
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].size, None);
        assert_eq!(cart.lines()[0].color, None);

        assert_eq!(
            Cart::new().add_line(&sneaker(), 1, some(" "), some("black")),
            Err(CartError::SizeRequired(ProductId::new(1)))
        );
    }

    #[test]
    fn test_sized_product_requires_a_size() {
        let p = sneaker();
        assert_eq!(
            Cart::new().add_line(&p, 1, None, None),
            Err(CartError::SizeRequired(p.id))
        );
        assert_eq!(
            Cart::new().add_line(&p, 1, None, some("black")),
            Err(CartError::SizeRequired(p.id))
        );
    }

    #[test]
    fn test_missing_color_defaults_to_first() {
        let p = sneaker();
        let cart = Cart::new()
            .add_line(&p, 1, some("8"), None)
            .unwrap()
            .add_line(&p, 2, some("8"), some("black"))
            .unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].color.as_deref(), Some("black"));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_totals_use_sale_price() {
        let cart = Cart::new()
            .add_line(&product(1, 50, None), 2, None, None)
            .unwrap()
            .add_line(&product(2, 30, Some(20)), 3, None, None)
            .unwrap();
        assert_eq!(cart.lines()[1].line_total(), Decimal::from(60));
        assert_eq!(cart.cart_total(), Decimal::from(160));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_remove_line_is_variant_specific() {
        let p = sneaker();
        let cart = Cart::new()
            .add_line(&p, 1, some("8"), some("black"))
            .unwrap()
            .add_line(&p, 2, some("9"), some("black"))
            .unwrap();
        let key = LineKey::new(p.id, some("8"), some("black"));
        let cart = cart.remove_line(&key).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].size.as_deref(), Some("9"));

        assert_eq!(
            cart.remove_line(&key),
            Err(CartError::LineNotFound(key.clone()))
        );
    }

    #[test]
    fn test_remove_product_drops_all_variants() {
        let p = sneaker();
        let other = product(2, 10, None);
        let cart = Cart::new()
            .add_line(&p, 1, some("8"), None)
            .unwrap()
            .add_line(&p, 1, some("9"), None)
            .unwrap()
            .add_line(&other, 1, None, None)
            .unwrap()
            .remove_product(p.id);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product.id, other.id);
    }

    #[test]
    fn test_set_quantity() {
        let p = sneaker();
        let key = LineKey::new(p.id, some("8"), some("black"));
        let cart = Cart::new().add_line(&p, 1, some("8"), None).unwrap();

        let cart = cart.set_quantity(&key, 4).unwrap();
        assert_eq!(cart.item_count(), 4);
        let cart = cart.set_quantity(&key, 99).unwrap();
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
        assert_eq!(
            cart.clone().set_quantity(&key, 0),
            Err(CartError::InvalidQuantity(0))
        );

        let missing = LineKey::new(p.id, some("9"), some("black"));
        assert!(matches!(
            cart.set_quantity(&missing, 1),
            Err(CartError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_failed_transition_keeps_previous_cart() {
        let p = sneaker();
        let cart = Cart::new().add_line(&p, 2, some("8"), None).unwrap();
        let snapshot = cart.clone();
        assert!(cart.clone().add_line(&p, 0, some("8"), None).is_err());
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_clear_and_empty_totals() {
        let cart = Cart::new()
            .add_line(&sneaker(), 3, some("8"), None)
            .unwrap()
            .clear();
        assert!(cart.is_empty());
        assert_eq!(cart.cart_total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_cart_round_trips_through_json() {
        let cart = Cart::new()
            .add_line(&sneaker(), 2, some("9"), some("white"))
            .unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
