use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::ErrorDto,
        iap::{VerifyAndroidReceiptDto, VerifyReceiptResponseDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::iap::VerifyAndroidReceiptParams,
        service::iap::IapService,
        state::AppState,
    },
};

/// Tag for grouping in-app purchase endpoints in OpenAPI documentation
pub static IAP_TAG: &str = "iap";

/// Verify a Google Play subscription purchase and record it for the caller.
///
/// # Returns
/// - `200 OK` - Receipt verified and stored
/// - `400 Bad Request` - Missing purchase fields
/// - `502 Bad Gateway` - Google Play rejected the receipt
/// - `503 Service Unavailable` - Google Play credentials not configured
#[utoipa::path(
    post,
    path = "/api/iap/verify-receipt/android",
    tag = IAP_TAG,
    security(("bearer" = [])),
    request_body = VerifyAndroidReceiptDto,
    responses(
        (status = 200, description = "Receipt verified", body = VerifyReceiptResponseDto),
        (status = 400, description = "Invalid receipt data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 502, description = "Failed to verify receipt", body = ErrorDto),
        (status = 503, description = "Verification not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_android_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VerifyAndroidReceiptDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let transaction = IapService::new(&state.db, state.play_store.as_deref())
        .verify_android_receipt(VerifyAndroidReceiptParams::from_dto(user.id, payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(VerifyReceiptResponseDto {
            success: true,
            message: "Receipt verified".to_string(),
            data: transaction.into_dto(),
        }),
    ))
}
