//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! The admin gate is an extractor ([`RequireAdmin`]) rather than a layer so
//! only the admin routes pay for it.

pub mod identity;
pub mod request_id;

pub use identity::{AUTHENTICATED_EMAIL_HEADER, RequireAdmin};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
