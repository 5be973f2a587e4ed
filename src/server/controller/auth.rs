use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{
            AuthResponseDto, ChangePasswordDto, ForgotPasswordDto, ResetPasswordDto, SignInDto,
            SignUpDto, TokenPairDto,
        },
        user::ProfileDto,
    },
    server::{
        error::AppError,
        middleware::auth::{bearer_token, AuthGuard},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates a regular user and signs them in.
///
/// # Returns
/// - `201 Created` - Account created, tokens issued
/// - `400 Bad Request` - Invalid data or email already registered
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = AUTH_TAG,
    request_body = SignUpDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid data or user already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = AuthService::new(&state.db, &state.tokens)
        .sign_up(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// Sign in with email and password.
///
/// # Returns
/// - `200 OK` - Tokens issued
/// - `400 Bad Request` - Unknown email or wrong password
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = AUTH_TAG,
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseDto),
        (status = 400, description = "Unknown email or wrong password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = AuthService::new(&state.db, &state.tokens)
        .sign_in(payload)
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Sign out, revoking the current refresh token.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Signed out", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.tokens)
        .logout(user.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Signed out"))))
}

/// Exchange a refresh token for a new token pair.
///
/// The refresh token is sent as the bearer token. Each refresh token can be used once.
///
/// # Returns
/// - `200 OK` - New token pair
/// - `401 Unauthorized` - Missing, invalid or expired refresh token
/// - `403 Forbidden` - Refresh token was revoked or already used
#[utoipa::path(
    get,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Tokens rotated", body = TokenPairDto),
        (status = 401, description = "Invalid refresh token", body = ErrorDto),
        (status = 403, description = "Refresh token revoked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(&headers)?;

    let tokens = AuthService::new(&state.db, &state.tokens)
        .refresh(token)
        .await?;

    Ok((StatusCode::OK, Json(tokens.into_dto())))
}

/// Get the signed-in user's profile and favorite episode ids.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = ProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = AuthService::new(&state.db, &state.tokens)
        .profile(user.id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Change the signed-in user's password.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password is wrong or new password invalid
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    patch,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Current password incorrect or invalid new password", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    AuthService::new(&state.db, &state.tokens)
        .change_password(user.id, payload)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password changed"))))
}

/// Request a password-reset code.
///
/// A five-digit code valid for five minutes is sent to the account's email.
///
/// # Returns
/// - `200 OK` - Code sent
/// - `404 Not Found` - No account with that email
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset code sent", body = MessageDto),
        (status = 400, description = "Invalid email", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    AuthService::new(&state.db, &state.tokens)
        .forgot_password(&payload.email, state.mailer.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Reset code sent"))))
}

/// Set a new password using a reset code.
///
/// # Returns
/// - `200 OK` - Password replaced
/// - `400 Bad Request` - Unknown email, wrong or expired code
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageDto),
        (status = 400, description = "Invalid or expired reset token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    AuthService::new(&state.db, &state.tokens)
        .reset_password(payload)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password reset"))))
}
