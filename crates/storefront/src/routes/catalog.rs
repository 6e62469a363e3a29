//! Shop page catalog endpoint: filter, sort and paginate.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use stride_core::{
    CatalogPage, CatalogQuery, CategoryId, MAX_PAGE_SIZE, PriceRange, Product, QueryError,
    SortKey, paginate,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Raw query string parameters.
///
/// Everything arrives as text so malformed values produce a JSON 400 with a
/// specific message instead of a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogParams {
    /// Comma-separated category ids, e.g. `1,3`.
    pub categories: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Comma-separated colors.
    pub colors: Option<String>,
    /// Comma-separated sizes.
    pub sizes: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn split_list(value: Option<&str>) -> Vec<String> {
    present(value)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_price(name: &str, value: Option<&str>) -> Result<Option<Decimal>> {
    present(value)
        .map(|v| {
            v.parse::<Decimal>()
                .map_err(|_| AppError::BadRequest(format!("{name} must be a number, got {v:?}")))
        })
        .transpose()
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("{name} must be an integer, got {value:?}")))
}

impl CatalogParams {
    /// Validate the parameters and build the pipeline query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` or `AppError::Query` for malformed or
    /// out-of-range values.
    pub fn into_query(self, default_page_size: u32) -> Result<CatalogQuery> {
        let category_ids = split_list(self.categories.as_deref())
            .iter()
            .map(|id| {
                id.parse::<CategoryId>()
                    .map_err(|_| AppError::BadRequest(format!("invalid category id {id:?}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let price_range = PriceRange::from_bounds(
            parse_price("minPrice", self.min_price.as_deref())?,
            parse_price("maxPrice", self.max_price.as_deref())?,
        )?;

        let sort = present(self.sort.as_deref())
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();

        let page_size = match present(self.page_size.as_deref()) {
            Some(raw) => {
                let got = parse_int("pageSize", raw)?;
                u32::try_from(got).map_err(|_| QueryError::InvalidPageSize {
                    got,
                    max: MAX_PAGE_SIZE,
                })?
            }
            None => default_page_size,
        };

        let page = match present(self.page.as_deref()) {
            Some(raw) => {
                let got = parse_int("page", raw)?;
                u32::try_from(got).map_err(|_| QueryError::InvalidPage(got))?
            }
            None => 1,
        };

        let query = CatalogQuery::new()
            .with_categories(category_ids)
            .with_price_range(price_range)
            .with_colors(split_list(self.colors.as_deref()))
            .with_sizes(split_list(self.sizes.as_deref()))
            .with_sort(sort)
            .with_page_size(page_size)
            .with_page(page);
        query.validate()?;
        Ok(query)
    }
}

/// GET /api/catalog
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<CatalogPage<Product>>> {
    let query = params.into_query(state.config().page_size)?;
    let products = state.store().products()?;
    let page = paginate(&products, &query)?.cloned();

    tracing::debug!(
        total = page.total_count,
        page = page.page,
        sort = %query.sort(),
        "Catalog page served"
    );
    Ok(Json(page))
}
