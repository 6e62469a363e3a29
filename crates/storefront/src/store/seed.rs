//! Demo catalog loaded at start-up.
//!
//! Four categories, eight products and four team members. Categories are
//! created first so products can refer to them by slug.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use stride_core::{NewCategory, NewProduct, NewTeamMember, Pricing, Slug};

use super::{CatalogStore, StoreResult};

macro_rules! photo {
    ($id:literal) => {
        concat!("https://images.unsplash.com/photo-", $id)
    };
}

macro_rules! photo_hd {
    ($id:literal) => {
        concat!(
            "https://images.unsplash.com/photo-",
            $id,
            "?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8",
            "&auto=format&fit=crop&w=1200&h=800&q=80"
        )
    };
}

const SIZES_TO_12: &[&str] = &[
    "7", "7.5", "8", "8.5", "9", "9.5", "10", "10.5", "11", "11.5", "12",
];
const SIZES_TO_13: &[&str] = &[
    "7", "7.5", "8", "8.5", "9", "9.5", "10", "10.5", "11", "11.5", "12", "13",
];

struct CategorySeed {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
}

struct ProductSeed {
    slug: &'static str,
    name: &'static str,
    short_description: &'static str,
    description: &'static str,
    price: i64,
    sale_price: Option<i64>,
    image_urls: &'static [&'static str],
    is_featured: bool,
    is_new: bool,
    category: &'static str,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    tags: &'static [&'static str],
}

struct TeamSeed {
    name: &'static str,
    role: &'static str,
    image_url: &'static str,
}

const CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        slug: "running",
        name: "RUNNING",
        description: "Performance running shoes designed for speed and comfort",
        image_url: photo!("1605348532760-6753d2c43329"),
    },
    CategorySeed {
        slug: "basketball",
        name: "BASKETBALL",
        description: "Premium basketball shoes for optimal court performance",
        image_url: photo!("1600185365926-3a2ce3cdb9eb"),
    },
    CategorySeed {
        slug: "lifestyle",
        name: "LIFESTYLE",
        description: "Stylish sneakers for everyday urban living",
        image_url: photo!("1606107557195-0e29a4b5b4aa"),
    },
    CategorySeed {
        slug: "training",
        name: "TRAINING",
        description: "Versatile training shoes for gym and cross-training",
        image_url: photo!("1539185441755-769473a23570"),
    },
];

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        slug: "eclipse-limited",
        name: "Eclipse Limited",
        short_description: "Luxury performance sneaker",
        description: "The Eclipse Limited combines cutting-edge technology with luxurious \
            materials for unmatched comfort and performance. Featuring responsive cushioning, \
            breathable mesh upper, and our proprietary traction system.",
        price: 299,
        sale_price: None,
        image_urls: &[photo_hd!("1595950653106-6c9ebd614d3a")],
        is_featured: true,
        is_new: true,
        category: "lifestyle",
        colors: &["black", "white", "red"],
        sizes: SIZES_TO_12,
        tags: &["premium", "limited", "lifestyle"],
    },
    ProductSeed {
        slug: "skyline-pro",
        name: "Skyline Pro",
        short_description: "Performance running shoe",
        description: "Engineered for serious runners, the Skyline Pro features our most \
            responsive foam yet for maximum energy return. The lightweight, breathable upper \
            conforms to your foot for a personalized fit.",
        price: 245,
        sale_price: None,
        image_urls: &[photo_hd!("1556906781-9a412961c28c")],
        is_featured: true,
        is_new: true,
        category: "running",
        colors: &["blue", "white", "black"],
        sizes: SIZES_TO_12,
        tags: &["running", "performance", "lightweight"],
    },
    ProductSeed {
        slug: "crimson-elite",
        name: "Crimson Elite",
        short_description: "Professional basketball shoe",
        description: "Dominate the court with the Crimson Elite. Engineered with \
            multi-directional support and responsive cushioning for explosive movements. The \
            high-top design provides ankle stability for aggressive play.",
        price: 320,
        sale_price: None,
        image_urls: &[photo_hd!("1542291026-7eec264c27ff")],
        is_featured: true,
        is_new: false,
        category: "basketball",
        colors: &["red", "black", "white"],
        sizes: SIZES_TO_13,
        tags: &["basketball", "professional", "high-top"],
    },
    ProductSeed {
        slug: "phantom-gt",
        name: "Phantom GT",
        short_description: "Professional soccer cleat",
        description: "The Phantom GT provides superior traction on all surfaces with a durable \
            rubber outsole. The lightweight upper conforms to your foot while providing \
            strategic support where you need it most.",
        price: 210,
        sale_price: Some(280),
        image_urls: &[photo_hd!("1600269452121-4f2416e55c28")],
        is_featured: true,
        is_new: false,
        category: "training",
        colors: &["gray", "white", "black"],
        sizes: SIZES_TO_12,
        tags: &["soccer", "cleats", "professional"],
    },
    ProductSeed {
        slug: "velocity-runner",
        name: "Velocity Runner",
        short_description: "Lightweight running shoe",
        description: "The Velocity Runner is designed for daily training runs with a perfect \
            balance of cushioning and responsiveness. The engineered mesh upper provides \
            breathability while maintaining durability.",
        price: 240,
        sale_price: None,
        image_urls: &[photo_hd!("1608231387042-66d1773070a5")],
        is_featured: false,
        is_new: false,
        category: "running",
        colors: &["blue", "black", "gray"],
        sizes: SIZES_TO_12,
        tags: &["running", "training", "lightweight"],
    },
    ProductSeed {
        slug: "shadow-walker",
        name: "Shadow Walker",
        short_description: "Lifestyle sneaker",
        description: "The Shadow Walker combines street style with premium materials for an \
            elevated everyday sneaker. The minimalist design features subtle detailing and a \
            comfortable cushioned midsole.",
        price: 180,
        sale_price: None,
        image_urls: &[photo_hd!("1491553895911-0055eca6402d")],
        is_featured: false,
        is_new: false,
        category: "lifestyle",
        colors: &["black", "white", "gray"],
        sizes: SIZES_TO_12,
        tags: &["lifestyle", "casual", "streetwear"],
    },
    ProductSeed {
        slug: "court-dominator",
        name: "Court Dominator",
        short_description: "Basketball performance",
        description: "The Court Dominator provides responsive cushioning and superior traction \
            for quick cuts and explosive jumps. The supportive upper locks your foot in place \
            for confident movement in any direction.",
        price: 230,
        sale_price: Some(290),
        image_urls: &[photo!("1605348532760-6753d2c43329")],
        is_featured: false,
        is_new: false,
        category: "basketball",
        colors: &["black", "red", "white"],
        sizes: SIZES_TO_13,
        tags: &["basketball", "performance", "sale"],
    },
    ProductSeed {
        slug: "velocity-x3-premium",
        name: "Velocity X3 Premium",
        short_description: "Premium performance sneaker",
        description: "The Velocity X3 combines cutting-edge technology with luxurious materials \
            for unmatched comfort and performance. Featuring responsive cushioning, breathable \
            mesh upper, and our proprietary traction system for ultimate performance and style.",
        price: 350,
        sale_price: None,
        image_urls: &[
            photo_hd!("1600185365926-3a2ce3cdb9eb"),
            photo_hd!("1542291026-7eec264c27ff"),
            photo_hd!("1606107557195-0e29a4b5b4aa"),
            photo_hd!("1608231387042-66d1773070a5"),
        ],
        is_featured: true,
        is_new: true,
        category: "running",
        colors: &["black", "white", "red", "blue"],
        sizes: SIZES_TO_13,
        tags: &["premium", "performance", "featured"],
    },
];

const TEAM: &[TeamSeed] = &[
    TeamSeed {
        name: "Alex Morgan",
        role: "Founder & CEO",
        image_url: photo!("1539571696357-5a69c17a67c6"),
    },
    TeamSeed {
        name: "Sarah Chen",
        role: "Lead Designer",
        image_url: photo!("1580489944761-15a19d654956"),
    },
    TeamSeed {
        name: "David Rodriguez",
        role: "Head of Product",
        image_url: photo!("1507003211169-0a1dd7228f2d"),
    },
    TeamSeed {
        name: "Maya Johnson",
        role: "Marketing Director",
        image_url: photo!("1573496359142-b8d87734a5a2"),
    },
];

const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("twitter", "https://twitter.com"),
    ("linkedin", "https://linkedin.com"),
    ("instagram", "https://instagram.com"),
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Load the demo catalog into `store`.
///
/// # Errors
///
/// Returns `StoreError` if any record is rejected, for example because the
/// store already holds a record with the same slug.
pub fn load(store: &dyn CatalogStore) -> StoreResult<()> {
    let mut category_ids = BTreeMap::new();
    for seed in CATEGORIES {
        let category = store.create_category(NewCategory {
            slug: Slug::parse(seed.slug)?,
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            image_url: Some(seed.image_url.to_string()),
        })?;
        category_ids.insert(seed.slug, category.id);
    }

    for seed in PRODUCTS {
        let pricing = Pricing::new(
            Decimal::from(seed.price),
            seed.sale_price.map(Decimal::from),
        )?;
        store.create_product(NewProduct {
            slug: Slug::parse(seed.slug)?,
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            short_description: Some(seed.short_description.to_string()),
            pricing,
            image_urls: strings(seed.image_urls),
            is_featured: seed.is_featured,
            is_new: seed.is_new,
            category_id: category_ids.get(seed.category).copied(),
            colors: strings(seed.colors),
            sizes: strings(seed.sizes),
            tags: strings(seed.tags),
        })?;
    }

    for seed in TEAM {
        store.create_team_member(NewTeamMember {
            name: seed.name.to_string(),
            role: seed.role.to_string(),
            image_url: Some(seed.image_url.to_string()),
            social_links: SOCIAL_LINKS
                .iter()
                .map(|(network, url)| ((*network).to_string(), (*url).to_string()))
                .collect(),
        })?;
    }

    tracing::info!(
        categories = CATEGORIES.len(),
        products = PRODUCTS.len(),
        team_members = TEAM.len(),
        "Seed catalog loaded"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    #[test]
    fn test_seed_counts() {
        let store = MemoryStore::seeded().unwrap();
        assert_eq!(store.categories().unwrap().len(), 4);
        assert_eq!(store.products().unwrap().len(), 8);
        assert_eq!(store.team_members().unwrap().len(), 4);
    }

    #[test]
    fn test_seed_flags_and_categories() {
        let store = MemoryStore::seeded().unwrap();
        assert_eq!(store.featured_products().unwrap().len(), 5);
        assert_eq!(store.new_arrivals().unwrap().len(), 3);

        let running = store.category_by_slug("running").unwrap().unwrap();
        let slugs: Vec<String> = store
            .products_in_category(running.id)
            .unwrap()
            .into_iter()
            .map(|p| p.slug.to_string())
            .collect();
        assert_eq!(slugs, vec!["skyline-pro", "velocity-runner", "velocity-x3-premium"]);
    }

    #[test]
    fn test_seed_sale_prices() {
        let store = MemoryStore::seeded().unwrap();
        let phantom = store.product_by_slug("phantom-gt").unwrap().unwrap();
        assert_eq!(phantom.effective_price(), Decimal::from(280));
        let x3 = store.product_by_slug("velocity-x3-premium").unwrap().unwrap();
        assert_eq!(x3.image_urls.len(), 4);
        assert!(x3.offers_size("13"));
    }

    #[test]
    fn test_seeding_twice_fails_on_duplicate_slug() {
        let store = MemoryStore::seeded().unwrap();
        assert!(matches!(load(&store), Err(StoreError::DuplicateSlug(_))));
    }

    #[test]
    fn test_team_social_links() {
        let store = MemoryStore::seeded().unwrap();
        let team = store.team_members().unwrap();
        assert_eq!(team[0].name, "Alex Morgan");
        assert_eq!(team[0].social_links.len(), 3);
    }
}
