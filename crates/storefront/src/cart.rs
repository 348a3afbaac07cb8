//! The shopping cart and its pure state transitions.
//!
//! A cart holds at most one line per product id, in the order products were
//! first added. Totals are computed on demand and never stored.

use serde::Serialize;
use thiserror::Error;

use luxelane_core::{Price, Product, ProductId, Quantity};

/// Errors from cart transitions. The cart is unchanged when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The resulting line quantity would not fit in a `u32`.
    #[error("quantity for product {0} is too large")]
    QuantityOverflow(ProductId),
}

/// One product in the cart.
///
/// The product is a snapshot taken when it was first added; later catalog
/// edits do not change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// Result of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was increased; holds the new quantity.
    Merged(Quantity),
}

/// Result of [`Cart::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line was removed; holds the removed line.
    Removed(CartLine),
    /// No line for that product id.
    NotInCart,
}

/// Result of [`Cart::set_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The line now has exactly this quantity.
    Updated(Quantity),
    /// The requested quantity was zero or negative, so the line was removed.
    Removed(CartLine),
    /// No line for that product id.
    NotInCart,
}

/// Ordered product/quantity selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity.get())).sum()
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if merging would overflow.
    pub fn add(&mut self, product: Product, quantity: Quantity) -> Result<AddOutcome, CartError> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            let merged = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(product.id.clone()))?;
            line.quantity = merged;
            return Ok(AddOutcome::Merged(merged));
        }

        self.lines.push(CartLine { product, quantity });
        Ok(AddOutcome::Added)
    }

    /// Remove the line for `id`. Removing an absent id changes nothing.
    pub fn remove(&mut self, id: &ProductId) -> RemoveOutcome {
        match self.lines.iter().position(|line| &line.product.id == id) {
            Some(index) => RemoveOutcome::Removed(self.lines.remove(index)),
            None => RemoveOutcome::NotInCart,
        }
    }

    /// Replace the quantity of the line for `id`.
    ///
    /// A requested quantity of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if `requested` exceeds `u32::MAX`.
    pub fn set_quantity(
        &mut self,
        id: &ProductId,
        requested: i64,
    ) -> Result<UpdateOutcome, CartError> {
        if requested <= 0 {
            return Ok(match self.remove(id) {
                RemoveOutcome::Removed(line) => UpdateOutcome::Removed(line),
                RemoveOutcome::NotInCart => UpdateOutcome::NotInCart,
            });
        }

        let Some(line) = self.lines.iter_mut().find(|line| &line.product.id == id) else {
            return Ok(UpdateOutcome::NotInCart);
        };

        let quantity = u32::try_from(requested)
            .ok()
            .and_then(Quantity::new)
            .ok_or_else(|| CartError::QuantityOverflow(id.clone()))?;
        line.quantity = quantity;
        Ok(UpdateOutcome::Updated(quantity))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
