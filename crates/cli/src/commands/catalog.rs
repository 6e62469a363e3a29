//! `catalog` command: run the shop page pipeline over the seed catalog.

use rust_decimal::Decimal;
use stride_core::{CatalogQuery, CategoryId, PriceRange, SortKey, paginate};
use stride_storefront::config::StorefrontConfig;
use stride_storefront::store::CatalogStore;
use tracing::info;

use super::{CommandError, print_json, seeded_store};

/// Filters and window for one catalog query.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub categories: Vec<CategoryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub sort: SortKey,
    pub page: u32,
    /// Falls back to the configured storefront page size.
    pub page_size: Option<u32>,
}

impl CatalogOptions {
    fn into_query(self, default_page_size: u32) -> Result<CatalogQuery, CommandError> {
        let query = CatalogQuery::new()
            .with_categories(self.categories)
            .with_price_range(PriceRange::from_bounds(self.min_price, self.max_price)?)
            .with_colors(self.colors)
            .with_sizes(self.sizes)
            .with_sort(self.sort)
            .with_page_size(self.page_size.unwrap_or(default_page_size))
            .with_page(self.page);
        query.validate()?;
        Ok(query)
    }
}

/// Print one page of matching products.
///
/// # Errors
///
/// Returns an error if the configuration or the query is invalid.
pub fn run(options: CatalogOptions) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let query = options.into_query(config.page_size)?;

    let store = seeded_store()?;
    let products = store.products()?;
    let page = paginate(&products, &query)?;

    info!(
        total = page.total_count,
        page = page.page,
        total_pages = page.total_pages,
        "Catalog query complete"
    );
    print_json(&page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn options() -> CatalogOptions {
        CatalogOptions {
            categories: Vec::new(),
            min_price: None,
            max_price: None,
            colors: Vec::new(),
            sizes: Vec::new(),
            sort: SortKey::Featured,
            page: 1,
            page_size: None,
        }
    }

    #[test]
    fn test_page_size_falls_back_to_default() {
        let query = options().into_query(6).unwrap();
        assert_eq!(query.page_size(), 6);

        let query = CatalogOptions {
            page_size: Some(2),
            page: 3,
            ..options()
        }
        .into_query(6)
        .unwrap();
        assert_eq!(query.page_size(), 2);
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn test_invalid_options() {
        let inverted = CatalogOptions {
            min_price: Some(Decimal::from(200)),
            max_price: Some(Decimal::from(100)),
            ..options()
        };
        assert!(inverted.into_query(6).is_err());

        let page_zero = CatalogOptions {
            page: 0,
            ..options()
        };
        assert!(page_zero.into_query(6).is_err());
    }

    #[test]
    fn test_filters_seed_catalog() {
        let query = CatalogOptions {
            categories: vec![CategoryId::new(1)],
            sort: SortKey::PriceAscending,
            page_size: Some(100),
            ..options()
        }
        .into_query(6)
        .unwrap();

        let products = seeded_store().unwrap().products().unwrap();
        let page = paginate(&products, &query).unwrap();
        assert_eq!(page.total_count, 3);
        let prices: Vec<Decimal> = page.items.iter().map(|p| p.effective_price()).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }
}
