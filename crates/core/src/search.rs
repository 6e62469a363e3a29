//! Free-text product search.

use crate::catalog::Product;

/// Products whose name, descriptions or tags contain `query`, ignoring case.
///
/// Results keep catalog order. A blank query matches nothing.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|product| matches(product, &needle))
        .collect()
}

fn matches(product: &Product, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);

    contains(&product.name)
        || product.description.as_deref().is_some_and(contains)
        || product.short_description.as_deref().is_some_and(contains)
        || product.tags.iter().any(|tag| contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;

    fn catalog() -> Vec<Product> {
        let mut eclipse = product(1, 299, None);
        eclipse.name = "Eclipse Limited".to_string();
        eclipse.tags = vec!["limited".to_string(), "premium".to_string()];

        let mut skyline = product(2, 245, None);
        skyline.name = "Skyline Pro".to_string();
        skyline.short_description = Some("Lightweight running shoe".to_string());

        let mut shadow = product(3, 180, None);
        shadow.name = "Shadow Walker".to_string();
        shadow.description = Some("A PREMIUM everyday sneaker".to_string());

        vec![eclipse, skyline, shadow]
    }

    fn ids(results: &[&Product]) -> Vec<i32> {
        results.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let products = catalog();
        assert!(search(&products, "").is_empty());
        assert!(search(&products, "   ").is_empty());
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let products = catalog();
        assert_eq!(ids(&search(&products, "SKYLINE")), vec![2]);
    }

    #[test]
    fn test_matches_descriptions_and_tags_in_catalog_order() {
        let products = catalog();
        assert_eq!(ids(&search(&products, " premium ")), vec![1, 3]);
        assert_eq!(ids(&search(&products, "running")), vec![2]);
    }

    #[test]
    fn test_no_match() {
        let products = catalog();
        assert!(search(&products, "sandal").is_empty());
    }
}
