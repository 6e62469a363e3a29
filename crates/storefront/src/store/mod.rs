//! Catalog storage.
//!
//! Products, categories and team members live behind the [`CatalogStore`]
//! trait so handlers never care where records come from. The only backend is
//! [`MemoryStore`], filled from [`seed`] at start-up.
//!
//! Listing order is id order, which for seeded data is insertion order. The
//! `featured` sort in the catalog pipeline relies on this.

pub mod memory;
pub mod seed;

use stride_core::{
    Category, CategoryId, NewCategory, NewProduct, NewTeamMember, PricingError, Product,
    ProductId, ProductPatch, Slug, SlugError, TeamMember,
};
use thiserror::Error;

pub use memory::MemoryStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already uses this slug.
    #[error("slug already in use: {0}")]
    DuplicateSlug(Slug),

    /// A slug string failed validation.
    #[error("invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    /// The record breaks a pricing invariant.
    #[error("invalid pricing: {0}")]
    InvalidPricing(#[from] PricingError),

    /// A product references a category that does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// A writer panicked while holding the lock.
    #[error("store lock poisoned")]
    Poisoned,

    /// No free id is left for the table.
    #[error("id space exhausted")]
    IdsExhausted,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read and write access to catalog records.
///
/// Lookups return `Ok(None)` for unknown keys; `Err` is reserved for store
/// faults.
pub trait CatalogStore: Send + Sync {
    // Products
    fn products(&self) -> StoreResult<Vec<Product>>;
    fn product(&self, id: ProductId) -> StoreResult<Option<Product>>;
    fn product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>>;
    fn products_in_category(&self, category_id: CategoryId) -> StoreResult<Vec<Product>>;
    fn featured_products(&self) -> StoreResult<Vec<Product>>;
    fn new_arrivals(&self) -> StoreResult<Vec<Product>>;
    fn create_product(&self, product: NewProduct) -> StoreResult<Product>;
    fn update_product(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Option<Product>>;
    fn delete_product(&self, id: ProductId) -> StoreResult<bool>;

    // Categories
    fn categories(&self) -> StoreResult<Vec<Category>>;
    fn category(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    fn create_category(&self, category: NewCategory) -> StoreResult<Category>;

    // Team
    fn team_members(&self) -> StoreResult<Vec<TeamMember>>;
    fn create_team_member(&self, member: NewTeamMember) -> StoreResult<TeamMember>;

    /// Cheap check that the store can serve reads.
    fn ping(&self) -> StoreResult<()> {
        self.categories().map(|_| ())
    }
}
