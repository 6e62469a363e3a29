//! Product search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use stride_core::Product;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search results.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    /// The query as sent, untrimmed.
    pub query: String,
    pub count: usize,
    pub results: Vec<Product>,
}

/// GET /api/search?q=
///
/// A blank query returns no results rather than the whole catalog.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let products = state.store().products()?;
    let results: Vec<Product> = stride_core::search(&products, &params.q)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(count = results.len(), "Search completed");

    Ok(Json(SearchResults {
        count: results.len(),
        query: params.q,
        results,
    }))
}
