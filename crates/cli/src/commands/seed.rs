//! `seed` command: dump the demo catalog the storefront starts with.

use serde::Serialize;
use stride_core::{Category, Product, TeamMember};
use stride_storefront::store::CatalogStore;

use super::{CommandError, print_json, seeded_store};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedCatalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    team_members: Vec<TeamMember>,
}

fn collect(store: &dyn CatalogStore) -> Result<SeedCatalog, CommandError> {
    Ok(SeedCatalog {
        categories: store.categories()?,
        products: store.products()?,
        team_members: store.team_members()?,
    })
}

/// Print the seed catalog as JSON.
///
/// # Errors
///
/// Returns an error if the seed data is rejected or output fails.
pub fn run() -> Result<(), CommandError> {
    let store = seeded_store()?;
    print_json(&collect(&store)?)
}
