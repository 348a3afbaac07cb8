//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Filtered, sorted product listing
//! GET  /products/featured      - Home page strip
//! GET  /products/{id}          - Product detail with related products
//! GET  /categories             - Category list with counts
//! GET  /categories/{category}  - Products in one category
//! GET  /search?q=              - Substring search
//!
//! # Cart
//! GET  /cart                   - Cart with totals and order summary
//! POST /cart/add               - Add a product (quantity defaults to 1)
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! POST /checkout               - Place a simulated order
//!
//! # Admin (requires x-authenticated-email of the admin account)
//! POST /admin/products         - Add a product to the catalog
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::{AppState, SharedStore};
use crate::store::StoreError;

/// Turn a refused store operation into an error response that carries the
/// notifications the store raised while refusing it.
pub(crate) fn refused(store: &mut SharedStore, err: StoreError) -> AppError {
    AppError::from(err).with_notifications(store.notifier_mut().drain())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/{id}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::categories))
        .route("/{category}", get(products::category))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/products", post(admin::create_product))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .route("/search", get(products::search))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
        .nest("/admin", admin_routes())
}
