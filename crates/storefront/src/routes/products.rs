//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use stride_core::Product;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing selectors. At most one is honored, in field order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Category slug.
    pub category: Option<String>,
    /// `"true"` selects featured products.
    pub featured: Option<String>,
    /// `"true"` selects new arrivals.
    pub new_arrivals: Option<String>,
}

fn flag_set(value: Option<&str>) -> bool {
    value == Some("true")
}

/// List products.
///
/// GET /api/products[?category=slug | ?featured=true | ?newArrivals=true]
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let store = state.store();

    let products = if let Some(slug) = query.category.as_deref().filter(|s| !s.is_empty()) {
        let category = store
            .category_by_slug(slug)?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
        store.products_in_category(category.id)?
    } else if flag_set(query.featured.as_deref()) {
        store.featured_products()?
    } else if flag_set(query.new_arrivals.as_deref()) {
        store.new_arrivals()?
    } else {
        store.products()?
    };

    Ok(Json(products))
}

/// Show one product.
///
/// GET /api/products/{slug}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Product>> {
    state
        .store()
        .product_by_slug(&slug)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
