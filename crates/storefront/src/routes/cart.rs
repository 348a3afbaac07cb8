//! Cart route handlers.
//!
//! Every mutation returns the updated cart together with the notifications
//! the store emitted while applying it.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use luxelane_core::{Price, ProductId, Quantity};

use crate::cart::CartLine;
use crate::checkout::OrderSummary;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::notify::Notification;
use crate::state::{AppState, SharedStore};

/// Cart contents with derived totals.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub count: u64,
    pub summary: OrderSummary,
}

impl CartView {
    pub(crate) fn of(store: &SharedStore) -> Self {
        let total = store.cart_total();
        Self {
            lines: store.cart().lines().to_vec(),
            total,
            count: store.cart_count(),
            summary: OrderSummary::from_subtotal(total),
        }
    }
}

/// Response to a cart mutation.
#[derive(Debug, Serialize)]
pub struct CartUpdate {
    pub cart: CartView,
    pub notifications: Vec<Notification>,
}

impl CartUpdate {
    fn drain(store: &mut SharedStore) -> Self {
        Self {
            notifications: store.notifier_mut().drain(),
            cart: CartView::of(store),
        }
    }
}

/// A quantity as sent by a client: a JSON number or the raw text of a
/// quantity input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(serde_json::Number),
    Text(String),
}

impl QuantityInput {
    fn requested(&self) -> Result<i64> {
        match self {
            Self::Number(n) => n.as_i64().ok_or_else(|| {
                AppError::BadRequest(format!("quantity: must be a whole number (got {n})"))
            }),
            Self::Text(text) => Quantity::parse_requested(text)
                .map_err(|e| AppError::BadRequest(format!("quantity: {e}"))),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: Option<QuantityInput>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: QuantityInput,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Show the cart.
///
/// GET /cart
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    let store = state.store()?;
    Ok(Json(CartView::of(&store)))
}

/// Add a catalog product to the cart.
///
/// POST /cart/add
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartUpdate>> {
    let requested = form.quantity.as_ref().map_or(Ok(1), QuantityInput::requested)?;

    let mut store = state.store()?;
    let product = store
        .product(&form.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    add_breadcrumb("cart", "Added to cart", &[("product_id", form.product_id.as_str())]);

    store
        .add_to_cart(product, requested)
        .map_err(|e| super::refused(&mut store, e))?;
    Ok(Json(CartUpdate::drain(&mut store)))
}

/// Set a line's quantity; zero or less removes it.
///
/// POST /cart/update
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartUpdate>> {
    let requested = form.quantity.requested()?;

    let mut store = state.store()?;
    store
        .update_quantity(&form.product_id, requested)
        .map_err(|e| super::refused(&mut store, e))?;
    Ok(Json(CartUpdate::drain(&mut store)))
}

/// Remove a line.
///
/// POST /cart/remove
#[instrument(skip(state), fields(product_id = %form.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartUpdate>> {
    let mut store = state.store()?;
    store.remove_from_cart(&form.product_id);
    Ok(Json(CartUpdate::drain(&mut store)))
}

/// Empty the cart.
///
/// POST /cart/clear
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartUpdate>> {
    let mut store = state.store()?;
    store.clear_cart();
    Ok(Json(CartUpdate::drain(&mut store)))
}
