//! Outgoing mail seam for password-reset codes.

use async_trait::async_trait;

use crate::server::error::AppError;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers a password-reset code to `email`.
    async fn send_reset_code(&self, email: &str, name: &str, code: &str) -> Result<(), AppError>;
}

/// Writes reset codes to the log instead of sending mail.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_reset_code(&self, email: &str, name: &str, code: &str) -> Result<(), AppError> {
        tracing::info!(%email, %name, %code, "Password reset code issued");

        Ok(())
    }
}
