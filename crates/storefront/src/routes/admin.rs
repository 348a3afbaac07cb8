//! Admin route handlers.
//!
//! All handlers here require [`RequireAdmin`].

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use luxelane_core::Product;

use crate::admin::ProductForm;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::notify::Notification;
use crate::state::AppState;

/// Response to a successful product creation.
#[derive(Debug, Serialize)]
pub struct ProductCreated {
    pub product: Product,
    pub notifications: Vec<Notification>,
}

/// Add a product to the catalog.
///
/// POST /admin/products
#[instrument(skip_all, fields(admin = %admin, name = %form.name))]
pub async fn create_product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<ProductCreated>)> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut store = state.store()?;
    let product = form
        .into_product(store.next_product_id())
        .map_err(AppError::Validation)?;

    store
        .add_product(product.clone())
        .map_err(|e| super::refused(&mut store, e))?;
    tracing::info!(product_id = %product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductCreated {
            product,
            notifications: store.notifier_mut().drain(),
        }),
    ))
}
