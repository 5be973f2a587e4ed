//! Account lifecycle: signup, signin, token rotation and password management.
//!
//! Refresh tokens and passwords are stored as Argon2 hashes. Reset codes are short-lived
//! five-digit numbers stored alongside their expiry.

pub mod password;
pub mod token;

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::{
    model::auth::{ChangePasswordDto, ResetPasswordDto, SignInDto, SignUpDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        model::{
            auth::AuthSession,
            user::{CreateUserParams, Profile},
        },
        service::{mail::Mailer, user::UserService},
    },
};

use password::{hash_secret, verify_secret};
use token::{TokenPair, TokenService};

/// How long a password-reset code stays valid.
pub const RESET_CODE_TTL_MINUTES: i64 = 5;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Registers a regular user and signs them in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - The new user with an issued token pair
    /// - `Err(AuthError::UserExists)` - The email is already registered
    pub async fn sign_up(&self, dto: SignUpDto) -> Result<AuthSession, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&dto.email).await?.is_some() {
            return Err(AuthError::UserExists.into());
        }

        let password_hash = hash_secret(&dto.password)?;
        let user = repo
            .create(CreateUserParams::from_sign_up(dto, password_hash))
            .await?;

        tracing::info!(user_id = user.id, "User signed up");

        let tokens = self.rotate_tokens(user.id, &user.email).await?;

        Ok(AuthSession {
            user_id: user.id,
            name: user.name,
            email: user.email,
            tokens,
        })
    }

    /// # Returns
    /// - `Ok(AuthSession)` - Credentials matched
    /// - `Err(AuthError::UserDoesNotExist)` - Unknown email
    /// - `Err(AuthError::IncorrectPassword)` - Wrong password
    pub async fn sign_in(&self, dto: SignInDto) -> Result<AuthSession, AppError> {
        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_email(&dto.email)
            .await?
            .ok_or(AuthError::UserDoesNotExist)?;

        if !verify_secret(&dto.password, &user.password)? {
            return Err(AuthError::IncorrectPassword.into());
        }

        let tokens = self.rotate_tokens(user.id, &user.email).await?;

        Ok(AuthSession {
            user_id: user.id,
            name: user.name,
            email: user.email,
            tokens,
        })
    }

    /// Revokes the stored refresh token.
    pub async fn logout(&self, user_id: i32) -> Result<(), AppError> {
        UserRepository::new(self.db)
            .set_refresh_token(user_id, None)
            .await?;

        Ok(())
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// The presented token must be the one most recently issued to the user; each refresh
    /// replaces it.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Rotated tokens
    /// - `Err(AuthError::InvalidToken)` - Bad signature or expired
    /// - `Err(AuthError::RefreshTokenRevoked)` - Logged out or superseded token
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.verify_refresh(refresh_token)?;

        let user = UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotInDatabase(claims.sub))?;

        let matches = match user.refresh_token.as_deref() {
            Some(stored) => verify_secret(refresh_token, stored)?,
            None => false,
        };
        if !matches {
            return Err(AuthError::RefreshTokenRevoked(user.id).into());
        }

        self.rotate_tokens(user.id, &user.email).await
    }

    pub async fn profile(&self, user_id: i32) -> Result<Profile, AppError> {
        UserService::new(self.db)
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotInDatabase(user_id).into())
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        if !verify_secret(&dto.current_password, &user.password)? {
            return Err(AuthError::IncorrectCurrentPassword.into());
        }

        repo.set_password(user.id, hash_secret(&dto.new_password)?)
            .await?;

        Ok(())
    }

    /// Generates a reset code for `email` and hands it to the mailer.
    ///
    /// # Returns
    /// - `Ok(())` - Code stored and delivered
    /// - `Err(AppError::NotFound)` - No user with that email
    pub async fn forgot_password(&self, email: &str, mailer: &dyn Mailer) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        let code = generate_reset_code();
        let expires_at = Utc::now() + Duration::minutes(RESET_CODE_TTL_MINUTES);
        repo.set_reset_token(user.id, code.clone(), expires_at)
            .await?;

        mailer.send_reset_code(&user.email, &user.name, &code).await
    }

    /// # Returns
    /// - `Ok(())` - Password replaced and code consumed
    /// - `Err(AuthError::UserDoesNotExist)` - Unknown email
    /// - `Err(AuthError::InvalidResetToken)` - Code differs or has expired
    pub async fn reset_password(&self, dto: ResetPasswordDto) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_email(&dto.email)
            .await?
            .ok_or(AuthError::UserDoesNotExist)?;

        let valid = match (user.reset_token.as_deref(), user.reset_token_expires_at) {
            (Some(stored), Some(expires_at)) => stored == dto.token && expires_at > Utc::now(),
            _ => false,
        };
        if !valid {
            return Err(AuthError::InvalidResetToken.into());
        }

        repo.set_password(user.id, hash_secret(&dto.new_password)?)
            .await?;

        tracing::info!(user_id = user.id, "Password reset");

        Ok(())
    }

    /// Issues a new pair and stores the refresh token's hash, replacing any previous one.
    async fn rotate_tokens(&self, user_id: i32, email: &str) -> Result<TokenPair, AppError> {
        let tokens = self.tokens.issue_pair(user_id, email)?;

        UserRepository::new(self.db)
            .set_refresh_token(user_id, Some(hash_secret(&tokens.refresh_token)?))
            .await?;

        Ok(tokens)
    }
}

fn generate_reset_code() -> String {
    let mut rng = rand::rng();

    rng.random_range(10000..100000).to_string()
}

#[cfg(test)]
mod tests;
