//! Cart route handlers.
//!
//! The cart is stored whole in the visitor's session under [`CART_KEY`].
//! Every handler loads it, applies one pure [`Cart`] transition and saves the
//! result. Mutations answer with `HX-Trigger: cart-updated` and
//! `X-Cart-Count` so any UI can refresh its badge without polling.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stride_core::{Cart, CheckoutSummary, LineKey, ProductId, ProductSnapshot, round_money};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Session key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Event name sent in `HX-Trigger` after every cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart, or an empty one for a fresh session.
///
/// Handlers load, transform and save with no lock held in between. Two
/// concurrent mutations from one session can race, and the later save wins.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(CART_KEY).await?.unwrap_or_default())
}

/// Persist the cart in the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(CART_KEY, cart).await?;
    Ok(())
}

/// Headers announcing a cart change.
pub(crate) fn cart_updated_headers(cart: &Cart) -> AppendHeaders<[(&'static str, String); 2]> {
    AppendHeaders([
        ("hx-trigger", CART_UPDATED_EVENT.to_string()),
        ("x-cart-count", cart.item_count().to_string()),
    ])
}

// =============================================================================
// Views
// =============================================================================

/// One cart line with its prices worked out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product: ProductSnapshot,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// The cart as returned by every cart endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub summary: CheckoutSummary,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product: line.product.clone(),
                    size: line.size.clone(),
                    color: line.color.clone(),
                    quantity: line.quantity,
                    unit_price: round_money(line.product.pricing.effective()),
                    line_total: round_money(line.line_total()),
                })
                .collect(),
            item_count: cart.item_count(),
            summary: CheckoutSummary::from_cart(cart),
        }
    }
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

// =============================================================================
// Request Bodies
// =============================================================================

const fn default_quantity() -> i64 {
    1
}

/// Add-to-cart body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineBody {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Quantity update body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityBody {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i64,
}

/// Line removal body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBody {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineBody {
    fn key(self) -> LineKey {
        LineKey::new(self.product_id, self.size, self.color)
    }
}

async fn commit(session: &Session, cart: Cart) -> Result<Response> {
    save_cart(session, &cart).await?;
    Ok((cart_updated_headers(&cart), Json(CartView::from(&cart))).into_response())
}

// =============================================================================
// Route Handlers
// =============================================================================

/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// GET /api/cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.item_count(),
    }))
}

/// POST /api/cart/lines
#[instrument(skip(state, session, body))]
pub async fn add_line(
    State(state): State<AppState>,
    session: Session,
    body: std::result::Result<Json<AddLineBody>, JsonRejection>,
) -> Result<Response> {
    let Json(body) = body?;
    let product = state
        .store()
        .product(body.product_id)?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let cart = load_cart(&session)
        .await?
        .add_line(&product, body.quantity, body.size, body.color)?;

    let product_id = product.id.to_string();
    add_breadcrumb(
        "cart",
        "Added line",
        Some(&[
            ("product_id", product_id.as_str()),
            ("slug", product.slug.as_str()),
        ]),
    );
    tracing::info!(product_id = %product.id, items = cart.item_count(), "Cart line added");

    commit(&session, cart).await
}

/// PATCH /api/cart/lines
#[instrument(skip(session, body))]
pub async fn set_quantity(
    session: Session,
    body: std::result::Result<Json<SetQuantityBody>, JsonRejection>,
) -> Result<Response> {
    let Json(body) = body?;
    let key = LineKey::new(body.product_id, body.size, body.color);

    let cart = load_cart(&session).await?.set_quantity(&key, body.quantity)?;

    let line = key.to_string();
    add_breadcrumb("cart", "Updated quantity", Some(&[("line", line.as_str())]));
    commit(&session, cart).await
}

/// DELETE /api/cart/lines
#[instrument(skip(session, body))]
pub async fn remove_line(
    session: Session,
    body: std::result::Result<Json<LineBody>, JsonRejection>,
) -> Result<Response> {
    let Json(body) = body?;
    let key = body.key();

    let cart = load_cart(&session).await?.remove_line(&key)?;

    let line = key.to_string();
    add_breadcrumb("cart", "Removed line", Some(&[("line", line.as_str())]));
    commit(&session, cart).await
}

/// DELETE /api/cart/products/{id}
///
/// Removes every variant of the product. Absent products are a no-op.
#[instrument(skip(session))]
pub async fn remove_product(
    session: Session,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Response> {
    let Path(id) = id?;
    let product_id = ProductId::new(id);

    let cart = load_cart(&session).await?.remove_product(product_id);

    let id = product_id.to_string();
    add_breadcrumb("cart", "Removed product", Some(&[("product_id", id.as_str())]));
    commit(&session, cart).await
}
