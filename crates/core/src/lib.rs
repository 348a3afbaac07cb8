//! LuxeLane Core - Shared domain types.
//!
//! This crate provides the types shared by every LuxeLane component:
//! - `storefront` - Catalog & cart store, HTTP API
//! - `cli` - Operator commands over the durable catalog
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no HTTP. Anything that touches the outside world lives in `storefront`.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for ids, prices, quantities, emails, and products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
