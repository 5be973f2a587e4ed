use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on a protected route.
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token failed signature or expiry validation.
    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// The token is valid but its subject no longer exists.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// Authenticated user lacks a required role.
    ///
    /// # Fields
    /// - User ID
    /// - Description of what was attempted, for logs only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Refresh token does not match the one stored for the user.
    #[error("Refresh token for user {0} is revoked or replaced")]
    RefreshTokenRevoked(i32),

    #[error("User already exists")]
    UserExists,

    #[error("User does not exist")]
    UserDoesNotExist,

    #[error("Password is incorrect")]
    IncorrectPassword,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,
}

/// Converts authentication errors into HTTP responses.
///
/// Token failures are logged at debug level; clients only see a generic message so that
/// token internals do not leak.
///
/// # Returns
/// - 400 Bad Request - credential and reset-code failures
/// - 401 Unauthorized - missing or invalid token, unknown token subject
/// - 403 Forbidden - missing role, revoked refresh token
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                tracing::debug!("{}", self);
                error_response(StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            Self::AccessDenied(_, _) | Self::RefreshTokenRevoked(_) => {
                tracing::debug!("{}", self);
                error_response(StatusCode::FORBIDDEN, "Access Denied".to_string())
            }
            Self::UserExists
            | Self::UserDoesNotExist
            | Self::IncorrectPassword
            | Self::IncorrectCurrentPassword
            | Self::InvalidResetToken => error_response(StatusCode::BAD_REQUEST, self.to_string()),
        }
    }
}
