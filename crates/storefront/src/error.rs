//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::checkout::{CheckoutError, FieldError};
use crate::notify::Notification;
use crate::storage::StorageError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// One or more form fields are invalid.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Request conflicts with existing data.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A store operation was refused after raising notifications.
    #[error("{error}")]
    Rejected {
        error: Box<AppError>,
        notifications: Vec<Notification>,
    },
}

impl AppError {
    /// Attach the notifications raised while the request failed, so they
    /// reach the client with the error.
    #[must_use]
    pub fn with_notifications(self, mut notifications: Vec<Notification>) -> Self {
        if notifications.is_empty() {
            return self;
        }
        match self {
            Self::Rejected {
                error,
                notifications: mut earlier,
            } => {
                earlier.append(&mut notifications);
                Self::Rejected {
                    error,
                    notifications: earlier,
                }
            }
            error => Self::Rejected {
                error: Box::new(error),
                notifications,
            },
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Rejected { error, .. } => error.status(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Catalog(e) => Self::Conflict(e.to_string()),
            StoreError::Cart(e) => Self::BadRequest(e.to_string()),
            StoreError::Storage(e) => Self::Storage(e),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => Self::BadRequest(CheckoutError::EmptyCart.to_string()),
            CheckoutError::Invalid(errors) => Self::Validation(errors),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notifications: Vec<Notification>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (err, notifications) = match self {
            Self::Rejected {
                error,
                notifications,
            } => (*error, notifications),
            err => (err, Vec::new()),
        };

        // Capture server errors to Sentry
        if matches!(err, Self::Storage(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&err);
            tracing::error!(
                error = %err,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = err.status();

        // Don't expose internal error details to clients
        let error = match &err {
            Self::Storage(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => err.to_string(),
        };
        let fields = match err {
            Self::Validation(errors) => errors,
            _ => Vec::new(),
        };

        (
            status,
            Json(ErrorBody {
                error,
                fields,
                notifications,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the current request.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
