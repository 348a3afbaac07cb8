//! Core types for LuxeLane.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, ProductIdError};
pub use price::{Price, PriceError};
pub use product::{PLACEHOLDER_IMAGE, Product};
pub use quantity::{Quantity, QuantityError};
