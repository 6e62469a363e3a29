//! In-memory catalog store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stride_core::catalog::{NewCategory, NewProduct, NewTeamMember, ProductPatch};
use stride_core::{Category, CategoryId, Product, ProductId, TeamMember, TeamMemberId};

use super::{CatalogStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, Category>,
    team_members: BTreeMap<TeamMemberId, TeamMember>,
    last_product_id: i32,
    last_category_id: i32,
    last_team_member_id: i32,
}

impl Tables {
    fn check_category(&self, category_id: Option<CategoryId>) -> StoreResult<()> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(StoreError::UnknownCategory(id)),
            _ => Ok(()),
        }
    }
}

/// Allocate the next id from a per-table counter. Ids start at 1.
fn next_id(last: &mut i32) -> StoreResult<i32> {
    *last = last.checked_add(1).ok_or(StoreError::IdsExhausted)?;
    Ok(*last)
}

/// Catalog held in `BTreeMap`s behind a single `RwLock`.
///
/// Ids are assigned from auto-incrementing counters and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store loaded with the demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the seed data violates a store invariant.
    pub fn seeded() -> StoreResult<Self> {
        let store = Self::new();
        super::seed::load(&store)?;
        Ok(store)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }

    fn select_products<F>(&self, predicate: F) -> StoreResult<Vec<Product>>
    where
        F: Fn(&Product) -> bool,
    {
        Ok(self
            .read()?
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect())
    }
}

impl CatalogStore for MemoryStore {
    fn products(&self) -> StoreResult<Vec<Product>> {
        self.select_products(|_| true)
    }

    fn product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .read()?
            .products
            .values()
            .find(|p| p.slug == *slug)
            .cloned())
    }

    fn products_in_category(&self, category_id: CategoryId) -> StoreResult<Vec<Product>> {
        self.select_products(|p| p.category_id == Some(category_id))
    }

    fn featured_products(&self) -> StoreResult<Vec<Product>> {
        self.select_products(|p| p.is_featured)
    }

    fn new_arrivals(&self) -> StoreResult<Vec<Product>> {
        self.select_products(|p| p.is_new)
    }

    fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        product.pricing.validate()?;
        let mut tables = self.write()?;
        tables.check_category(product.category_id)?;
        if tables.products.values().any(|p| p.slug == product.slug) {
            return Err(StoreError::DuplicateSlug(product.slug));
        }

        let id = ProductId::new(next_id(&mut tables.last_product_id)?);
        let product = Product::from_new(id, product);
        tables.products.insert(id, product.clone());
        tracing::debug!(product_id = %id, slug = %product.slug, "Product created");
        Ok(product)
    }

    fn update_product(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let mut tables = self.write()?;
        let Some(existing) = tables.products.get(&id) else {
            return Ok(None);
        };
        let updated = patch.apply(existing)?;
        tables.check_category(updated.category_id)?;
        tables.products.insert(id, updated.clone());
        Ok(Some(updated))
    }

    fn delete_product(&self, id: ProductId) -> StoreResult<bool> {
        Ok(self.write()?.products.remove(&id).is_some())
    }

    fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .values()
            .find(|c| c.slug == *slug)
            .cloned())
    }

    fn create_category(&self, category: NewCategory) -> StoreResult<Category> {
        let mut tables = self.write()?;
        if tables.categories.values().any(|c| c.slug == category.slug) {
            return Err(StoreError::DuplicateSlug(category.slug));
        }

        let id = CategoryId::new(next_id(&mut tables.last_category_id)?);
        let category = Category::from_new(id, category);
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    fn team_members(&self) -> StoreResult<Vec<TeamMember>> {
        Ok(self.read()?.team_members.values().cloned().collect())
    }

    fn create_team_member(&self, member: NewTeamMember) -> StoreResult<TeamMember> {
        let mut tables = self.write()?;
        let id = TeamMemberId::new(next_id(&mut tables.last_team_member_id)?);
        let member = TeamMember::from_new(id, member);
        tables.team_members.insert(id, member.clone());
        Ok(member)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use stride_core::{Pricing, Slug};

    use super::*;

    fn new_category(slug: &str) -> NewCategory {
        NewCategory {
            slug: Slug::parse(slug).unwrap(),
            name: slug.to_uppercase(),
            description: None,
            image_url: None,
        }
    }

    fn new_product(slug: &str, category_id: Option<CategoryId>) -> NewProduct {
        NewProduct {
            slug: Slug::parse(slug).unwrap(),
            name: slug.to_string(),
            description: None,
            short_description: None,
            pricing: Pricing::regular(Decimal::from(100)).unwrap(),
            image_urls: Vec::new(),
            is_featured: false,
            is_new: false,
            category_id,
            colors: Vec::new(),
            sizes: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_ids_auto_increment_from_one() {
        let store = MemoryStore::new();
        let a = store.create_product(new_product("a", None)).unwrap();
        let b = store.create_product(new_product("b", None)).unwrap();
        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.create_product(new_product("a", None)).unwrap();
        assert!(store.delete_product(a.id).unwrap());
        assert!(!store.delete_product(a.id).unwrap());
        let b = store.create_product(new_product("b", None)).unwrap();
        assert_eq!(b.id, ProductId::new(2));
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let store = MemoryStore::new();
        store.create_category(new_category("running")).unwrap();
        assert!(matches!(
            store.create_category(new_category("running")),
            Err(StoreError::DuplicateSlug(_))
        ));

        store.create_product(new_product("phantom-gt", None)).unwrap();
        assert!(matches!(
            store.create_product(new_product("phantom-gt", None)),
            Err(StoreError::DuplicateSlug(_))
        ));
    }

    #[test]
    fn test_product_requires_existing_category() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.create_product(new_product("a", Some(CategoryId::new(9)))),
            Err(StoreError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let store = MemoryStore::new();
        let running = store.create_category(new_category("running")).unwrap();
        let mut featured = new_product("skyline-pro", Some(running.id));
        featured.is_featured = true;
        store.create_product(featured).unwrap();
        let mut fresh = new_product("eclipse-limited", None);
        fresh.is_new = true;
        store.create_product(fresh).unwrap();

        assert_eq!(store.products_in_category(running.id).unwrap().len(), 1);
        assert_eq!(store.featured_products().unwrap()[0].slug.as_str(), "skyline-pro");
        assert_eq!(store.new_arrivals().unwrap()[0].slug.as_str(), "eclipse-limited");
        assert!(store.product_by_slug("eclipse-limited").unwrap().is_some());
        assert!(store.product_by_slug("nope").unwrap().is_none());
        assert_eq!(
            store.category_by_slug("running").unwrap().map(|c| c.id),
            Some(running.id)
        );
    }

    #[test]
    fn test_update_keeps_slug_and_validates() {
        let store = MemoryStore::new();
        let p = store.create_product(new_product("a", None)).unwrap();

        let patch = ProductPatch {
            name: Some("Renamed".to_string()),
            sale_price: Some(Some(Decimal::from(80))),
            ..ProductPatch::default()
        };
        let updated = store.update_product(p.id, patch).unwrap().unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.slug, p.slug);
        assert_eq!(updated.effective_price(), Decimal::from(80));

        let bad = ProductPatch {
            price: Some(Decimal::from(-1)),
            ..ProductPatch::default()
        };
        assert!(matches!(
            store.update_product(p.id, bad),
            Err(StoreError::InvalidPricing(_))
        ));
        assert_eq!(store.product(p.id).unwrap().unwrap().name, "Renamed");

        assert!(
            store
                .update_product(ProductId::new(99), ProductPatch::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_team_members() {
        let store = MemoryStore::new();
        store
            .create_team_member(NewTeamMember {
                name: "Alex Morgan".to_string(),
                role: "Founder & CEO".to_string(),
                image_url: None,
                social_links: BTreeMap::new(),
            })
            .unwrap();
        assert_eq!(store.team_members().unwrap().len(), 1);
        assert!(store.ping().is_ok());
    }
}
