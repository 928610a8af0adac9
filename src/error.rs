// src/error.rs
use axum::{http::StatusCode, response::{Html, IntoResponse, Response}};
use thiserror::Error;

use crate::view_model::product_form::FormField;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures talking to the remote product service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: http::StatusCode,
        message: Option<String>,
    },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid service url: {0}")]
    Url(String),
}

impl ServiceError {
    /// Message the service attached to the failure, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn user_message(&self, default: &str) -> String {
        self.message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

/// Submission blocked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Missing(FormField),

    #[error("{} must be a number", .0.label())]
    InvalidNumber(FormField),

    #[error("{} cannot be negative", .0.label())]
    Negative(FormField),

    #[error("form is not open")]
    NotOpen,

    #[error("a save is already in progress")]
    Busy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Errors of the admin screen's own HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Template(e) => {
                tracing::error!(error = %e, "Failed to render screen");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Html(format!(
            "<!doctype html><title>{code}</title><p>{msg}</p><p><a href=\"/productsManager\">Back to inventory</a></p>",
            code = status.as_u16(),
            msg = handlebars::html_escape(&error_message),
        ));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_when_server_gives_no_message() {
        let err = ServiceError::Server { status: http::StatusCode::CONFLICT, message: None };
        assert_eq!(err.user_message("Failed to add product."), "Failed to add product.");

        let err = ServiceError::Server {
            status: http::StatusCode::CONFLICT,
            message: Some("Barcode already exists".into()),
        };
        assert_eq!(err.user_message("Failed to add product."), "Barcode already exists");
    }

    #[test]
    fn decode_errors_use_default() {
        let err = ServiceError::Decode("eof".into());
        assert_eq!(err.message(), None);
        assert_eq!(err.user_message("Failed to fetch products."), "Failed to fetch products.");
    }
}
