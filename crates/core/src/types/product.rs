//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Image shown when a product has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A purchasable product.
///
/// This is also the persisted record format: the durable catalog is a JSON
/// array of these. `features` may be missing from older records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Non-negative unit price.
    pub price: Price,
    /// Image URL or path; may be empty.
    #[serde(default)]
    pub image: String,
    /// Category slug, e.g. `audio`.
    pub category: String,
    /// Bullet-point features, in display order.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// The image to display, falling back to [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }
}
