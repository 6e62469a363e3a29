//! `search` command.

use serde::Serialize;
use stride_core::Product;
use stride_storefront::store::CatalogStore;
use tracing::info;

use super::{CommandError, print_json, seeded_store};

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    count: usize,
    results: Vec<&'a Product>,
}

/// Print every seed product matching `query`.
///
/// # Errors
///
/// Returns an error if the seed catalog cannot be loaded or output fails.
pub fn run(query: &str) -> Result<(), CommandError> {
    let products = seeded_store()?.products()?;
    let results = stride_core::search(&products, query);

    info!(query, count = results.len(), "Search complete");
    print_json(&SearchOutput {
        query,
        count: results.len(),
        results,
    })
}
