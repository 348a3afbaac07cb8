//! Simulated checkout: order summary, shipping details, and order submission.
//!
//! No payment is taken. Submitting an order validates the form, snapshots the
//! cart into an [`OrderReceipt`], and clears the cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use luxelane_core::{Email, OrderId, Price};

use crate::cart::CartLine;
use crate::notify::{Notification, Notifier};
use crate::storage::KeyValueStore;
use crate::store::Store;

/// Orders with a subtotal above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::from_cents(5000);

/// Flat shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING: Price = Price::from_cents(1000);

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Order totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Compute shipping, tax, and total for a cart subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Price) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Price::ZERO
        } else {
            FLAT_SHIPPING
        };
        let tax = subtotal.scaled_by(TAX_RATE);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether this order qualifies for free shipping.
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    ApplePay,
}

/// Shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// A problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl CheckoutForm {
    /// Check every field, returning all problems found.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let required = [
            ("first_name", &self.first_name, "First name is required"),
            ("last_name", &self.last_name, "Last name is required"),
            ("address", &self.address, "Address is required"),
            ("city", &self.city, "City is required"),
            ("state", &self.state, "State is required"),
            ("zip", &self.zip, "ZIP code is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if let Err(e) = Email::parse(&self.email) {
            errors.push(FieldError::new("email", e.to_string()));
        }

        errors
    }
}

/// Errors from [`submit_order`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cannot check out with an empty cart")]
    EmptyCart,

    #[error("checkout form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),
}

/// Confirmation of a submitted order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub email: Email,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
}

/// Place an order for the current cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if there is nothing to order and
/// [`CheckoutError::Invalid`] with every field problem if the form is
/// incomplete. The cart is untouched on error.
#[instrument(skip_all)]
pub fn submit_order<S: KeyValueStore, N: Notifier>(
    store: &mut Store<S, N>,
    form: &CheckoutForm,
) -> Result<OrderReceipt, CheckoutError> {
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let email = match (form.validate(), Email::parse(&form.email)) {
        (errors, Ok(email)) if errors.is_empty() => email,
        (errors, _) => return Err(CheckoutError::Invalid(errors)),
    };

    let receipt = OrderReceipt {
        order_id: OrderId::generate(),
        placed_at: Utc::now(),
        email,
        payment_method: form.payment_method,
        lines: store.cart().lines().to_vec(),
        summary: OrderSummary::from_subtotal(store.cart_total()),
    };

    info!(
        order_id = %receipt.order_id,
        items = store.cart_count(),
        total = %receipt.summary.total,
        "Order submitted"
    );
    store
        .notifier_mut()
        .notify(Notification::success("Order submitted successfully!"));
    store.clear_cart();

    Ok(receipt)
}
