//! Catalog inspection commands.

use std::path::Path;

use tracing::info;

use luxelane_core::{Price, Product};
use luxelane_storefront::catalog::query::{self, ProductFilters, ProductSort};
use luxelane_storefront::store::CatalogSource;

use super::open_store;

/// Initialize storage under `data_dir`.
pub fn seed(data_dir: &Path) {
    let store = open_store(data_dir);
    let path = data_dir.display();

    match store.catalog_source() {
        CatalogSource::Loaded => {
            info!(path = %path, products = store.products().len(), "Catalog already present, nothing to do");
        }
        CatalogSource::Seeded => {
            info!(path = %path, products = store.products().len(), "Seeded default catalog");
        }
        CatalogSource::Recovered => {
            info!(path = %path, products = store.products().len(), "Replaced unreadable catalog with defaults");
        }
    }
}

/// List products, optionally restricted to one category.
pub fn list(data_dir: &Path, category: Option<&str>, sort: &str) {
    let store = open_store(data_dir);

    // The whole catalog, not just the shop's default price window
    let mut filters = ProductFilters {
        max_price: Price::MAX,
        ..ProductFilters::default()
    };
    if let Some(category) = category {
        filters.toggle_category(category);
    }

    let products = query::filter_and_sort(store.products(), &filters, ProductSort::parse(sort));
    log_products(&products);
    info!(count = products.len(), "Listed products");
}

/// Search the catalog.
pub fn search(data_dir: &Path, needle: &str) {
    let store = open_store(data_dir);

    let products = query::search(store.products(), needle);
    log_products(&products);
    info!(query = needle, count = products.len(), "Search complete");
}

fn log_products(products: &[&Product]) {
    for product in products {
        info!(
            id = %product.id,
            category = %product.category,
            price = %product.price,
            "{}",
            product.name
        );
    }
}
