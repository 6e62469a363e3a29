//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Liveness check
//! GET    /health/ready             - Store readiness check
//!
//! # Catalog
//! GET    /api/products             - Products (?category=slug | ?featured=true | ?newArrivals=true)
//! GET    /api/products/{slug}      - Product detail
//! GET    /api/categories           - Category listing
//! GET    /api/categories/{slug}    - Category detail
//! GET    /api/team-members         - Team members
//! GET    /api/catalog              - Filtered, sorted, paginated shop page
//! GET    /api/search?q=            - Free-text product search
//!
//! # Cart (session backed, mutations send HX-Trigger + X-Cart-Count)
//! GET    /api/cart                 - Cart with totals
//! POST   /api/cart/lines           - Add a line
//! PATCH  /api/cart/lines           - Set a line's quantity
//! DELETE /api/cart/lines           - Remove one variant line
//! DELETE /api/cart/products/{id}   - Remove every line for a product
//! GET    /api/cart/count           - Badge count
//!
//! # Checkout and contact
//! POST   /api/checkout             - Place order (clears the cart)
//! POST   /api/contact              - Contact form
//! ```

pub mod cart;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod contact;
pub mod health;
pub mod products;
pub mod search;
pub mod team;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{slug}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route(
            "/lines",
            post(cart::add_line)
                .patch(cart::set_quantity)
                .delete(cart::remove_line),
        )
        .route("/products/{id}", delete(cart::remove_product))
        .route("/count", get(cart::count))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .route("/team-members", get(team::index))
        .route("/catalog", get(catalog::index))
        .route("/search", get(search::search))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::place_order))
        .route("/contact", post(contact::submit))
        .fallback(api_not_found)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}

/// JSON 404 for unknown API paths.
async fn api_not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
