//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by handlers. Domain-specific errors convert into
//! it with `?` and either carry their own response mapping or fall through to a generic
//! 500 response whose details are only logged.

pub mod auth;
pub mod collection;
pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, collection::CollectionError, config::ConfigError, internal::InternalError,
    },
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 400/401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Malformed filter, sort or pagination parameters. Results in 400 Bad Request.
    #[error(transparent)]
    CollectionErr(#[from] CollectionError),

    /// Request body failed declarative validation. Results in 400 Bad Request.
    #[error(transparent)]
    ValidationErr(#[from] validator::ValidationErrors),

    /// Unexpected internal failure. Results in 500 Internal Server Error.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// I/O error, typically while binding the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found. Results in 404 Not Found with the provided message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request. Results in 400 Bad Request with the provided message.
    #[error("{0}")]
    BadRequest(String),

    /// A third-party service rejected or failed the request.
    ///
    /// Results in 502 Bad Gateway. The first field is returned to the client, the second
    /// holds upstream details that are only logged.
    #[error("{0}: {1}")]
    Upstream(String, String),

    /// An optional integration is not configured. Results in 503 Service Unavailable.
    #[error("{0}")]
    Unavailable(String),

    /// Internal server error with custom message.
    ///
    /// The message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Maps each error variant to a status code and an `ErrorDto` body.
///
/// # Returns
/// - 400 Bad Request - `BadRequest`, `ValidationErr`, `CollectionErr`
/// - 404 Not Found - `NotFound`
/// - 502 Bad Gateway - `Upstream`
/// - 503 Service Unavailable - `Unavailable`
/// - Variable - `AuthErr`, delegated to `AuthError::into_response()`
/// - 500 Internal Server Error - everything else
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::CollectionErr(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
            Self::ValidationErr(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            Self::Upstream(msg, detail) => {
                tracing::warn!(error = %detail, "Upstream failure: {}", msg);
                error_response(StatusCode::BAD_GATEWAY, msg)
            }
            Self::Unavailable(msg) => error_response(StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

pub(crate) fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorDto { error })).into_response()
}

/// Wraps any displayable error into a 500 response.
///
/// Logs the full message and returns a generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Upstream("x".into(), "detail".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Unavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::InternalError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::DbErr(sea_orm::DbErr::Custom("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::CollectionErr(CollectionError::UnknownField("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::AuthErr(AuthError::MissingToken), StatusCode::UNAUTHORIZED),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
