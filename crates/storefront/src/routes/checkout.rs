//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::checkout::{CheckoutForm, OrderReceipt, submit_order};
use crate::error::Result;
use crate::notify::Notification;
use crate::state::AppState;

/// Response to a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub receipt: OrderReceipt,
    pub notifications: Vec<Notification>,
}

/// Place an order for the current cart.
///
/// POST /checkout
#[instrument(skip_all, fields(payment_method = ?form.payment_method))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let mut store = state.store()?;
    let receipt = submit_order(&mut *store, &form)?;

    Ok(Json(CheckoutResponse {
        receipt,
        notifications: store.notifier_mut().drain(),
    }))
}
