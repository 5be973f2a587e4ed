use thiserror::Error;

/// Internal failures that indicate misconfiguration or bugs rather than bad input.
///
/// All variants result in a 500 Internal Server Error with a generic message returned to the
/// client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Argon2 failed to hash a secret or the stored hash is malformed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// A stored user role is not one of the known roles.
    #[error("Unknown role '{0}' stored for user")]
    InvalidRole(String),

    /// Signing a JWT failed.
    #[error("Failed to encode token: {0}")]
    TokenEncode(#[source] jsonwebtoken::errors::Error),

    /// The Google service account credentials were rejected while building an access token.
    #[error("Google service account error: {0}")]
    ServiceAccount(String),
}
