//! Catalog browsing route handlers.
//!
//! Read-only views over the catalog: the shop listing with filters, product
//! detail, category pages, and search.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use luxelane_core::{Price, Product, ProductId};

use crate::catalog::query::{self, ProductFilters, ProductSort, STRIP_LIMIT};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the shop listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Comma-separated category slugs.
    pub categories: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    fn filters(&self) -> Result<ProductFilters> {
        let mut filters = ProductFilters::default();

        if let Some(categories) = &self.categories {
            filters.categories = categories
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(min) = non_blank(self.min_price.as_deref()) {
            filters.min_price = parse_price("min_price", min)?;
        }
        if let Some(max) = non_blank(self.max_price.as_deref()) {
            filters.max_price = parse_price("max_price", max)?;
        }

        Ok(filters)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(param: &str, value: &str) -> Result<Price> {
    Price::parse(value).map_err(|e| AppError::BadRequest(format!("{param}: {e}")))
}

/// Shop listing response.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub count: usize,
    pub sort: &'static str,
}

/// Product detail with its related products.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
}

/// One entry on the categories page.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub slug: String,
    pub title: String,
    pub count: usize,
}

/// Products in one category.
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub slug: String,
    pub title: String,
    pub products: Vec<Product>,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search response.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub products: Vec<Product>,
}

fn owned(products: Vec<&Product>) -> Vec<Product> {
    products.into_iter().cloned().collect()
}

/// Filtered, sorted shop listing.
///
/// GET /products?categories=audio,home&min_price=0&max_price=500&sort=price-low-high
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ProductList>> {
    let filters = params.filters()?;
    let sort = params.sort.as_deref().map(ProductSort::parse).unwrap_or_default();

    let store = state.store()?;
    let products = owned(query::filter_and_sort(store.products(), &filters, sort));

    Ok(Json(ProductList {
        count: products.len(),
        products,
        sort: sort.as_str(),
    }))
}

/// The home page's featured strip.
///
/// GET /products/featured
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let store = state.store()?;
    Ok(Json(owned(query::featured(store.products(), STRIP_LIMIT))))
}

/// Product detail.
///
/// GET /products/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>> {
    let not_found = || AppError::NotFound(format!("product {id}"));
    let product_id = ProductId::parse(&id).map_err(|_| not_found())?;

    let store = state.store()?;
    let product = store.product(&product_id).ok_or_else(not_found)?;
    let related = owned(query::related(store.products(), product, STRIP_LIMIT));

    Ok(Json(ProductDetail {
        product: product.clone(),
        related,
    }))
}

/// Every category with its product count.
///
/// GET /categories
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<CategorySummary>>> {
    let store = state.store()?;
    let products = store.products();

    let summaries = query::categories(products)
        .into_iter()
        .map(|slug| CategorySummary {
            slug: slug.to_owned(),
            title: query::category_title(slug),
            count: query::by_category(products, slug).len(),
        })
        .collect();

    Ok(Json(summaries))
}

/// Products in one category. An unknown category is an empty page.
///
/// GET /categories/{category}
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryPage>> {
    let store = state.store()?;
    let products = owned(query::by_category(store.products(), &slug));

    Ok(Json(CategoryPage {
        title: query::category_title(&slug),
        slug,
        products,
    }))
}

/// Substring search.
///
/// GET /search?q=wireless
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let store = state.store()?;
    let products = owned(query::search(store.products(), &params.q));

    Ok(Json(SearchResults {
        query: params.q,
        products,
    }))
}
