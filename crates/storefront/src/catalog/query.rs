//! Browsing queries over the catalog: search, category pages, shop filters.
//!
//! Everything here is a linear pass over a borrowed product slice. The
//! catalog is small enough that no index is kept.

use std::collections::HashSet;

use luxelane_core::{Price, Product};

/// How many products the home page and "related products" strip show.
pub const STRIP_LIMIT: usize = 4;

/// Upper bound of the shop's default price range, in dollars.
pub const DEFAULT_MAX_PRICE_DOLLARS: u32 = 1500;

/// Shop filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilters {
    /// Categories to include; empty means every category.
    pub categories: Vec<String>,
    /// Minimum price (inclusive).
    pub min_price: Price,
    /// Maximum price (inclusive).
    pub max_price: Price,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            min_price: Price::ZERO,
            max_price: Price::from_cents(DEFAULT_MAX_PRICE_DOLLARS * 100),
        }
    }
}

impl ProductFilters {
    /// Toggle a category in or out of the selection.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category.to_owned());
        }
    }

    fn matches(&self, product: &Product) -> bool {
        let in_category =
            self.categories.is_empty() || self.categories.iter().any(|c| *c == product.category);
        in_category && product.price >= self.min_price && product.price <= self.max_price
    }
}

/// Shop sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    /// Parse from URL parameter value. Unknown values fall back to `Featured`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low-high" => Self::PriceLowHigh,
            "price-high-low" => Self::PriceHighLow,
            "name-a-z" => Self::NameAsc,
            "name-z-a" => Self::NameDesc,
            _ => Self::Featured,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::NameAsc => "name-a-z",
            Self::NameDesc => "name-z-a",
        }
    }
}

/// Apply shop filters, then sort. Sorting is stable, so ties keep catalog order.
#[must_use]
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    filters: &ProductFilters,
    sort: ProductSort,
) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| filters.matches(p)).collect();

    match sort {
        ProductSort::Featured => {}
        ProductSort::PriceLowHigh => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        ProductSort::PriceHighLow => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        ProductSort::NameAsc => matched.sort_by(|a, b| compare_names(&a.name, &b.name)),
        ProductSort::NameDesc => matched.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }

    matched
}

fn compare_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Case-insensitive substring search over name, description, and category.
///
/// A blank query matches nothing.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Products whose category equals `category`, ignoring case.
#[must_use]
pub fn by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    let wanted = category.trim().to_lowercase();
    products
        .iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .collect()
}

/// Distinct categories in the order they first appear.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

/// Up to `limit` other products from the same category.
#[must_use]
pub fn related<'a>(products: &'a [Product], product: &Product, limit: usize) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .collect()
}

/// The first `limit` products in catalog order.
#[must_use]
pub fn featured(products: &[Product], limit: usize) -> Vec<&Product> {
    products.iter().take(limit).collect()
}

/// Capitalize the first letter of a category slug for display (`audio` → `Audio`).
#[must_use]
pub fn category_title(category: &str) -> String {
    let mut chars = category.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
