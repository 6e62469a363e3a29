//! Checkout route handler.
//!
//! Orders are not persisted or charged. Placing one snapshots the session
//! cart into a confirmation and empties the cart.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use stride_core::{Cart, CheckoutSummary};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use super::cart::{CartLineView, CartView, cart_updated_headers, load_cart, save_cart};
use crate::error::{AppError, Result, add_breadcrumb};

/// Receipt for a placed order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    pub message: String,
    pub summary: CheckoutSummary,
    pub lines: Vec<CartLineView>,
    pub placed_at: DateTime<Utc>,
}

/// Order numbers look like `STR-1A2B3C4D`.
fn order_number() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("STR-{}", id.get(..8).unwrap_or(&id))
}

impl OrderConfirmation {
    fn for_cart(cart: &Cart) -> Self {
        let view = CartView::from(cart);
        Self {
            order_number: order_number(),
            message: "Order Placed Successfully!".to_string(),
            summary: view.summary,
            lines: view.lines,
            placed_at: Utc::now(),
        }
    }
}

/// POST /api/checkout
#[instrument(skip(session))]
pub async fn place_order(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty".to_string()));
    }

    let confirmation = OrderConfirmation::for_cart(&cart);
    let cart = cart.clear();
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_number", confirmation.order_number.as_str())]),
    );
    tracing::info!(
        order_number = %confirmation.order_number,
        total = %confirmation.summary.total,
        items = confirmation.summary.item_count,
        "Order placed"
    );

    Ok((cart_updated_headers(&cart), Json(confirmation)).into_response())
}
