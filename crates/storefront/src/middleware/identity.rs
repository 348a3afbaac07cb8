//! Identity extractors.
//!
//! Sign-in is handled by an upstream identity service, which forwards the
//! signed-in account's email in the `x-authenticated-email` header. These
//! extractors read that header; they do not authenticate anyone themselves.

use axum::{extract::FromRequestParts, http::request::Parts};

use luxelane_core::Email;

use crate::admin::is_admin;
use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Header carrying the signed-in account's email.
pub const AUTHENTICATED_EMAIL_HEADER: &str = "x-authenticated-email";

fn authenticated_email(parts: &Parts) -> Result<Option<Email>, AppError> {
    let Some(value) = parts.headers.get(AUTHENTICATED_EMAIL_HEADER) else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("malformed identity header".to_string()))?;

    Email::parse(raw)
        .map(Some)
        .map_err(|_| AppError::Unauthorized("malformed identity header".to_string()))
}

/// Extractor that requires the configured admin account.
///
/// Missing identity is rejected with 401, any other account with 403.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAdmin(email): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {email}!")
/// }
/// ```
pub struct RequireAdmin(pub Email);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let email = authenticated_email(parts)?
            .ok_or_else(|| AppError::Unauthorized("sign in required".to_string()))?;

        set_sentry_user(email.as_str());

        if !is_admin(&email, &state.config().admin_email) {
            tracing::warn!(email = %email, "Non-admin attempted admin action");
            return Err(AppError::Forbidden("admin access required".to_string()));
        }

        Ok(Self(email))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/admin/products");
        if let Some(value) = header {
            builder = builder.header(AUTHENTICATED_EMAIL_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_missing_header() {
        assert!(authenticated_email(&parts(None)).unwrap().is_none());
    }

    #[test]
    fn test_valid_header() {
        let email = authenticated_email(&parts(Some("Admin@Example.com"))).unwrap().unwrap();
        assert_eq!(email.domain(), "Example.com");
    }

    #[test]
    fn test_malformed_header() {
        let err = authenticated_email(&parts(Some("not an email"))).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
