//! Catalog records: products, categories and team members.
//!
//! [`Pricing::effective`] is the one place the sale-price override is
//! resolved. The query pipeline, the cart and checkout all go through it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId, Slug, TeamMemberId};

/// Errors for invalid price data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("price must be non-negative, got {0}")]
    NegativePrice(Decimal),
    #[error("sale price must be non-negative, got {0}")]
    NegativeSalePrice(Decimal),
}

/// Base price plus an optional sale price.
///
/// When a sale price is present it is the price the customer pays and the
/// price the catalog filters and sorts on, whether or not it is lower than
/// the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
}

impl Pricing {
    /// Create validated pricing.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if either amount is negative.
    pub fn new(price: Decimal, sale_price: Option<Decimal>) -> Result<Self, PricingError> {
        let pricing = Self { price, sale_price };
        pricing.validate()?;
        Ok(pricing)
    }

    /// Pricing with no sale price.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NegativePrice` if `price` is negative.
    pub fn regular(price: Decimal) -> Result<Self, PricingError> {
        Self::new(price, None)
    }

    /// Check the non-negativity invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.price < Decimal::ZERO {
            return Err(PricingError::NegativePrice(self.price));
        }
        match self.sale_price {
            Some(sale) if sale < Decimal::ZERO => Err(PricingError::NegativeSalePrice(sale)),
            _ => Ok(()),
        }
    }

    /// The price actually charged: the sale price if set, else the base price.
    #[must_use]
    pub fn effective(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    #[serde(flatten)]
    pub pricing: Pricing,
    /// Ordered; the first image is the primary one.
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Build a product from creation input and its assigned id.
    #[must_use]
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            slug: new.slug,
            name: new.name,
            description: new.description,
            short_description: new.short_description,
            pricing: new.pricing,
            image_urls: new.image_urls,
            is_featured: new.is_featured,
            is_new: new.is_new,
            category_id: new.category_id,
            colors: new.colors,
            sizes: new.sizes,
            tags: new.tags,
        }
    }

    /// See [`Pricing::effective`].
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.pricing.effective()
    }

    /// The primary image, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// The subset of product data a cart line keeps.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.clone(),
            pricing: self.pricing,
            image_url: self.primary_image().map(str::to_owned),
        }
    }
}

/// Input for creating a product. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub slug: Slug,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    #[serde(flatten)]
    pub pricing: Pricing,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for a product.
///
/// There is deliberately no slug field: slugs never change after creation.
/// `sale_price: Some(None)` clears the sale price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub short_description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub sale_price: Option<Option<Decimal>>,
    pub image_urls: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
    pub category_id: Option<Option<CategoryId>>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl ProductPatch {
    /// Apply the patch to a copy of `product`.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if the patched pricing is invalid; the input
    /// product is left as it was.
    pub fn apply(self, product: &Product) -> Result<Product, PricingError> {
        let mut updated = product.clone();
        if let Some(name) = self.name {
            updated.name = name;
        }
        if let Some(description) = self.description {
            updated.description = description;
        }
        if let Some(short_description) = self.short_description {
            updated.short_description = short_description;
        }
        if let Some(price) = self.price {
            updated.pricing.price = price;
        }
        if let Some(sale_price) = self.sale_price {
            updated.pricing.sale_price = sale_price;
        }
        if let Some(image_urls) = self.image_urls {
            updated.image_urls = image_urls;
        }
        if let Some(is_featured) = self.is_featured {
            updated.is_featured = is_featured;
        }
        if let Some(is_new) = self.is_new {
            updated.is_new = is_new;
        }
        if let Some(category_id) = self.category_id {
            updated.category_id = category_id;
        }
        if let Some(colors) = self.colors {
            updated.colors = colors;
        }
        if let Some(sizes) = self.sizes {
            updated.sizes = sizes;
        }
        if let Some(tags) = self.tags {
            updated.tags = tags;
        }
        updated.pricing.validate()?;
        Ok(updated)
    }
}

/// Product data carried by a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub slug: Slug,
    pub name: String,
    #[serde(flatten)]
    pub pricing: Pricing,
    pub image_url: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub slug: Slug,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub slug: Slug,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Category {
    #[must_use]
    pub fn from_new(id: CategoryId, new: NewCategory) -> Self {
        Self {
            id,
            slug: new.slug,
            name: new.name,
            description: new.description,
            image_url: new.image_url,
        }
    }
}

/// A member of the team shown on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub role: String,
    pub image_url: Option<String>,
    /// Network name to profile URL.
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}

/// Input for creating a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}

impl TeamMember {
    #[must_use]
    pub fn from_new(id: TeamMemberId, new: NewTeamMember) -> Self {
        Self {
            id,
            name: new.name,
            role: new.role,
            image_url: new.image_url,
            social_links: new.social_links,
        }
    }
}
