//! Catalog filter/sort/paginate pipeline.
//!
//! [`paginate`] narrows a product collection by category, effective price,
//! color and size, orders the survivors with a stable sort, and cuts out one
//! page. The input slice is never modified.
//!
//! [`CatalogQuery`] is an owned value. Its `with_*` and `toggle_*` methods
//! return a new query and put it back on page 1, because a page number picked
//! for one result set means nothing for a different one. Only
//! [`CatalogQuery::with_page`] moves the page.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::CategoryId;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Invalid query input. These are caller errors and are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("page must be at least 1, got {0}")]
    InvalidPage(i64),
    #[error("page size must be between 1 and {max}, got {got}")]
    InvalidPageSize { got: i64, max: u32 },
    #[error("minimum price {min} is greater than maximum price {max}")]
    InvertedPriceRange { min: Decimal, max: Decimal },
    #[error("price bounds must be non-negative, got {0}")]
    NegativePrice(Decimal),
    #[error("unknown sort {0:?}, expected one of: featured, price-asc, price-desc, newest")]
    UnknownSort(String),
}

/// Sort order for catalog results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Catalog order, untouched.
    #[default]
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "price-asc")]
    PriceAscending,
    #[serde(rename = "price-desc")]
    PriceDescending,
    /// New arrivals first; catalog order within each group.
    #[serde(rename = "newest")]
    Newest,
}

impl SortKey {
    pub const ALL: [Self; 4] = [
        Self::Featured,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::Newest,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAscending => "price-asc",
            Self::PriceDescending => "price-desc",
            Self::Newest => "newest",
        }
    }

    fn apply(self, products: &mut [&Product]) {
        // slice::sort_by is stable, so ties keep catalog order.
        match self {
            Self::Featured => {}
            Self::PriceAscending => {
                products.sort_by(|a, b| a.effective_price().cmp(&b.effective_price()));
            }
            Self::PriceDescending => {
                products.sort_by(|a, b| b.effective_price().cmp(&a.effective_price()));
            }
            Self::Newest => products.sort_by_key(|p| !p.is_new),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    /// Also accepts the `price-low`/`price-high` names used by older clients.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" => Ok(Self::Featured),
            "price-asc" | "price-low" => Ok(Self::PriceAscending),
            "price-desc" | "price-high" => Ok(Self::PriceDescending),
            "newest" => Ok(Self::Newest),
            other => Err(QueryError::UnknownSort(other.to_string())),
        }
    }
}

/// Inclusive bounds on a product's effective price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Create a range, inclusive on both ends.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if a bound is negative or `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, QueryError> {
        for bound in [min, max] {
            if bound < Decimal::ZERO {
                return Err(QueryError::NegativePrice(bound));
            }
        }
        if min > max {
            return Err(QueryError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build a range from optional bounds; a missing bound is open.
    ///
    /// # Errors
    ///
    /// Same as [`PriceRange::new`].
    pub fn from_bounds(min: Option<Decimal>, max: Option<Decimal>) -> Result<Self, QueryError> {
        Self::new(min.unwrap_or(Decimal::ZERO), max.unwrap_or(Decimal::MAX))
    }

    /// A range every non-negative price falls into.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Active filters, sort order and page window.
///
/// An empty category, color or size set means "no restriction", not
/// "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    category_ids: BTreeSet<CategoryId>,
    price_range: PriceRange,
    colors: BTreeSet<String>,
    sizes: BTreeSet<String>,
    sort: SortKey,
    page: u32,
    page_size: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category_ids: BTreeSet::new(),
            price_range: PriceRange::unbounded(),
            colors: BTreeSet::new(),
            sizes: BTreeSet::new(),
            sort: SortKey::Featured,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories<I>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = CategoryId>,
    {
        Self {
            category_ids: ids.into_iter().collect(),
            page: 1,
            ..self
        }
    }

    /// Add the category if absent, remove it if present.
    #[must_use]
    pub fn toggle_category(mut self, id: CategoryId) -> Self {
        if !self.category_ids.remove(&id) {
            self.category_ids.insert(id);
        }
        self.page = 1;
        self
    }

    #[must_use]
    pub fn with_price_range(self, price_range: PriceRange) -> Self {
        Self {
            price_range,
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_colors<I, S>(self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_color(mut self, color: &str) -> Self {
        if !self.colors.remove(color) {
            self.colors.insert(color.to_string());
        }
        self.page = 1;
        self
    }

    #[must_use]
    pub fn with_sizes<I, S>(self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sizes: sizes.into_iter().map(Into::into).collect(),
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_size(mut self, size: &str) -> Self {
        if !self.sizes.remove(size) {
            self.sizes.insert(size.to_string());
        }
        self.page = 1;
        self
    }

    #[must_use]
    pub fn with_sort(self, sort: SortKey) -> Self {
        Self {
            sort,
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_page_size(self, page_size: u32) -> Self {
        Self {
            page_size,
            page: 1,
            ..self
        }
    }

    /// Move to another page of the same result set.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// Clear every filter and the sort, keeping the page size.
    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            page_size: self.page_size,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn price_range(&self) -> PriceRange {
        self.price_range
    }

    #[must_use]
    pub const fn category_ids(&self) -> &BTreeSet<CategoryId> {
        &self.category_ids
    }

    #[must_use]
    pub const fn colors(&self) -> &BTreeSet<String> {
        &self.colors
    }

    #[must_use]
    pub const fn sizes(&self) -> &BTreeSet<String> {
        &self.sizes
    }

    /// Check the page window.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidPage` for page 0 and
    /// `QueryError::InvalidPageSize` for a page size of 0 or above
    /// [`MAX_PAGE_SIZE`].
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page == 0 {
            return Err(QueryError::InvalidPage(0));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(QueryError::InvalidPageSize {
                got: i64::from(self.page_size),
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(())
    }

    /// Whether a product passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.price_range.contains(product.effective_price())
            && intersects(&self.colors, &product.colors)
            && intersects(&self.sizes, &product.sizes)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category_ids.is_empty()
            || product
                .category_id
                .is_some_and(|id| self.category_ids.contains(&id))
    }
}

/// Empty filter sets match everything.
fn intersects(filter: &BTreeSet<String>, values: &[String]) -> bool {
    filter.is_empty() || values.iter().any(|v| filter.contains(v))
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage<T> {
    pub items: Vec<T>,
    /// Number of products that passed the filters, across all pages.
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

impl<T> CatalogPage<T> {
    #[must_use]
    pub fn map<U, F>(self, f: F) -> CatalogPage<U>
    where
        F: FnMut(T) -> U,
    {
        CatalogPage {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogPage<&Product> {
    /// Clone the borrowed products into an owned page.
    #[must_use]
    pub fn cloned(self) -> CatalogPage<Product> {
        self.map(Clone::clone)
    }
}

/// Run the pipeline: filter, stable sort, count, slice.
///
/// A page past the end is an empty page, not an error.
///
/// # Errors
///
/// Returns `QueryError` if the page or page size is out of bounds.
pub fn paginate<'a>(
    products: &'a [Product],
    query: &CatalogQuery,
) -> Result<CatalogPage<&'a Product>, QueryError> {
    query.validate()?;

    let mut matched: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    query.sort.apply(&mut matched);

    let total_count = matched.len();
    let page_size = query.page_size as usize;
    let start = (query.page as usize - 1).saturating_mul(page_size);
    let items = matched.into_iter().skip(start).take(page_size).collect();

    Ok(CatalogPage {
        items,
        total_count,
        page: query.page,
        page_size: query.page_size,
        total_pages: total_count.div_ceil(page_size),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::types::ProductId;

    fn ids(page: &CatalogPage<&Product>) -> Vec<i32> {
        page.items.iter().map(|p| p.id.as_i32()).collect()
    }

    fn shoe(id: i32, price: i64, category: i32, colors: &[&str], sizes: &[&str]) -> Product {
        let mut p = product(id, price, None);
        p.category_id = Some(CategoryId::new(category));
        p.colors = colors.iter().map(ToString::to_string).collect();
        p.sizes = sizes.iter().map(ToString::to_string).collect();
        p
    }

    fn catalog() -> Vec<Product> {
        let mut items = vec![
            shoe(1, 299, 3, &["black", "white", "red"], &["8", "9"]),
            shoe(2, 245, 1, &["blue", "white"], &["8", "10"]),
            shoe(3, 320, 2, &["red", "black"], &["12", "13"]),
            shoe(4, 210, 4, &["gray", "white"], &["9"]),
            shoe(5, 240, 1, &["blue", "gray"], &["8"]),
            shoe(6, 180, 3, &["black", "white"], &["7", "8"]),
            shoe(7, 230, 2, &["black", "red"], &["13"]),
        ];
        items[3].pricing.sale_price = Some(Decimal::from(280));
        items[6].pricing.sale_price = Some(Decimal::from(290));
        items[0].is_new = true;
        items[1].is_new = true;
        items
    }

    fn everything() -> CatalogQuery {
        CatalogQuery::new().with_page_size(MAX_PAGE_SIZE)
    }

    #[test]
    fn test_price_range_uses_effective_price() {
        let products = vec![
            product(1, 100, None),
            product(2, 200, Some(150)),
            product(3, 300, None),
        ];
        let range = PriceRange::new(Decimal::from(100), Decimal::from(150)).unwrap();
        let query = everything().with_price_range(range);
        let page = paginate(&products, &query).unwrap();
        // Product 1 sits on the inclusive lower bound.
        assert_eq!(ids(&page), vec![1, 2]);

        let range = PriceRange::new(Decimal::from(101), Decimal::from(150)).unwrap();
        let page = paginate(&products, &everything().with_price_range(range)).unwrap();
        assert_eq!(ids(&page), vec![2]);
    }

    #[test]
    fn test_price_membership_matches_effective_price_for_every_product() {
        let products = catalog();
        let range = PriceRange::new(Decimal::from(230), Decimal::from(290)).unwrap();
        let page = paginate(&products, &everything().with_price_range(range)).unwrap();
        for p in &products {
            let listed = page.items.iter().any(|q| q.id == p.id);
            assert_eq!(listed, range.contains(p.effective_price()), "product {}", p.id);
        }
    }

    #[test]
    fn test_empty_filters_select_everything() {
        let products = catalog();
        let page = paginate(&products, &everything()).unwrap();
        assert_eq!(page.total_count, products.len());
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_category_filter_skips_uncategorized() {
        let mut products = catalog();
        products.push(product(8, 100, None));
        let query = everything().with_categories([CategoryId::new(1), CategoryId::new(2)]);
        let page = paginate(&products, &query).unwrap();
        assert_eq!(ids(&page), vec![2, 3, 5, 7]);
    }

    #[test]
    fn test_color_and_size_filters_intersect() {
        let products = catalog();
        let query = everything().with_colors(["blue"]).with_sizes(["8", "9"]);
        let page = paginate(&products, &query).unwrap();
        assert_eq!(ids(&page), vec![2, 5]);
    }

    #[test]
    fn test_total_count_counts_all_filtered_products() {
        let products = catalog();
        let query = CatalogQuery::new().with_colors(["white"]).with_page_size(2);
        let page = paginate(&products, &query).unwrap();
        let expected = products.iter().filter(|p| query.matches(p)).count();
        assert_eq!(page.total_count, expected);
        assert_eq!(page.total_count, 4);
        assert!(page.items.len() <= page.total_count);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let mut products = catalog();
        // Same effective price as product 5 (240), listed before it.
        products.insert(0, product(9, 240, None));
        let asc = paginate(&products, &everything().with_sort(SortKey::PriceAscending)).unwrap();
        assert_eq!(ids(&asc), vec![6, 9, 5, 2, 4, 7, 1, 3]);

        let desc = paginate(&products, &everything().with_sort(SortKey::PriceDescending)).unwrap();
        assert_eq!(ids(&desc), vec![3, 1, 7, 4, 2, 9, 5, 6]);
    }

    #[test]
    fn test_newest_puts_new_arrivals_first_in_catalog_order() {
        let products = catalog();
        let page = paginate(&products, &everything().with_sort(SortKey::Newest)).unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6, 7]);

        let mut products = catalog();
        products[5].is_new = true;
        let page = paginate(&products, &everything().with_sort(SortKey::Newest)).unwrap();
        assert_eq!(ids(&page), vec![1, 2, 6, 3, 4, 5, 7]);
    }

    #[test]
    fn test_pipeline_is_idempotent_and_leaves_input_alone() {
        let products = catalog();
        let before = products.clone();
        let query = CatalogQuery::new()
            .with_sort(SortKey::PriceDescending)
            .with_colors(["black"]);
        let first = paginate(&products, &query).unwrap();
        let second = paginate(&products, &query).unwrap();
        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn test_pages_cover_results_without_gaps_or_overlaps() {
        let products = catalog();
        for page_size in 1..=8 {
            let base = CatalogQuery::new()
                .with_sort(SortKey::PriceAscending)
                .with_page_size(page_size);
            let total_pages = paginate(&products, &base).unwrap().total_pages;
            let mut seen: Vec<ProductId> = Vec::new();
            for page in 1..=u32::try_from(total_pages).unwrap() {
                let result = paginate(&products, &base.clone().with_page(page)).unwrap();
                seen.extend(result.items.iter().map(|p| p.id));
            }
            let full = paginate(&products, &everything().with_sort(SortKey::PriceAscending))
                .unwrap()
                .items
                .iter()
                .map(|p| p.id)
                .collect::<Vec<_>>();
            assert_eq!(seen, full, "page size {page_size}");
        }
    }

    #[test]
    fn test_last_page_is_partial_and_past_end_is_empty() {
        let products = catalog();
        let query = CatalogQuery::new().with_page_size(3);
        let last = paginate(&products, &query.clone().with_page(3)).unwrap();
        assert_eq!(ids(&last), vec![7]);

        let beyond = paginate(&products, &query.with_page(9)).unwrap();
        assert!(beyond.is_empty());
        assert_eq!(beyond.total_count, 7);
    }

    #[test]
    fn test_zero_page_or_page_size_is_rejected() {
        let products = catalog();
        assert_eq!(
            paginate(&products, &CatalogQuery::new().with_page(0)),
            Err(QueryError::InvalidPage(0))
        );
        assert!(matches!(
            paginate(&products, &CatalogQuery::new().with_page_size(0)),
            Err(QueryError::InvalidPageSize { got: 0, .. })
        ));
        assert!(matches!(
            paginate(&products, &CatalogQuery::new().with_page_size(MAX_PAGE_SIZE + 1)),
            Err(QueryError::InvalidPageSize { .. })
        ));
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let query = CatalogQuery::new().with_page(4);
        assert_eq!(query.clone().toggle_color("red").page(), 1);
        assert_eq!(query.clone().toggle_size("9").page(), 1);
        assert_eq!(query.clone().toggle_category(CategoryId::new(2)).page(), 1);
        assert_eq!(query.clone().with_sort(SortKey::Newest).page(), 1);
        assert_eq!(
            query.clone().with_price_range(PriceRange::unbounded()).page(),
            1
        );
        assert_eq!(query.with_page(2).page(), 2);
    }

    #[test]
    fn test_toggles_add_then_remove() {
        let query = CatalogQuery::new().toggle_color("red").toggle_color("blue");
        assert_eq!(query.colors().len(), 2);
        let query = query.toggle_color("red");
        assert!(query.colors().contains("blue"));
        assert!(!query.colors().contains("red"));
    }

    #[test]
    fn test_reset_keeps_page_size() {
        let query = CatalogQuery::new()
            .with_page_size(12)
            .toggle_size("8")
            .with_sort(SortKey::Newest)
            .reset();
        assert_eq!(query.page_size(), 12);
        assert!(query.sizes().is_empty());
        assert_eq!(query.sort(), SortKey::Featured);
    }

    #[test]
    fn test_price_range_validation() {
        assert!(matches!(
            PriceRange::new(Decimal::from(300), Decimal::from(100)),
            Err(QueryError::InvertedPriceRange { .. })
        ));
        assert!(matches!(
            PriceRange::from_bounds(Some(Decimal::from(-1)), None),
            Err(QueryError::NegativePrice(_))
        ));
        let open = PriceRange::from_bounds(None, Some(Decimal::from(50))).unwrap();
        assert!(open.contains(Decimal::ZERO));
        assert!(!open.contains(Decimal::from(51)));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceAscending));
        assert_eq!("price-desc".parse::<SortKey>(), Ok(SortKey::PriceDescending));
        assert_eq!(SortKey::default(), SortKey::Featured);
        assert!(matches!(
            "cheapest".parse::<SortKey>(),
            Err(QueryError::UnknownSort(_))
        ));
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
    }
}
