//! Search, filter, and sort for the product grid.

use larder_core::search::{self, PriceRange, SortDirection};
use serde::{Deserialize, Serialize};

use super::Product;

/// Sort key for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Keep catalog order.
    #[default]
    Featured,
    Name,
    Price,
    Rating,
    Newest,
}

/// Filters applied to the product grid, in the order the UI exposes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Free text matched against name, description, and category.
    pub search: String,
    /// Exact category match (case-insensitive); `None` means all.
    pub category: Option<String>,
    pub price: PriceRange,
    pub in_stock_only: bool,
    pub sort: ProductSort,
    pub direction: SortDirection,
}

impl ProductQuery {
    /// Products matching the query, sorted.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut matches: Vec<Product> = search::search(products, &self.search, |p| {
            vec![p.name.as_str(), p.description.as_str(), p.category.as_str()]
        })
        .into_iter()
        .filter(|p| {
            self.category
                .as_deref()
                .is_none_or(|category| p.category.eq_ignore_ascii_case(category))
        })
        .filter(|p| self.price.contains(p.price.amount()))
        .filter(|p| !self.in_stock_only || p.in_stock())
        .cloned()
        .collect();

        let direction = self.direction;
        match self.sort {
            ProductSort::Featured => {}
            ProductSort::Name => {
                search::sort_by_key(&mut matches, direction, |p| p.name.to_lowercase());
            }
            ProductSort::Price => search::sort_by_key(&mut matches, direction, |p| p.price.amount()),
            ProductSort::Rating => search::sort_by_key(&mut matches, direction, |p| p.rating),
            ProductSort::Newest => {
                // Newest first reads as descending dates.
                search::sort_by_key(&mut matches, direction, |p| std::cmp::Reverse(p.created_at));
            }
        }
        matches
    }
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c.eq_ignore_ascii_case(&product.category)) {
            seen.push(product.category.clone());
        }
    }
    seen
}
