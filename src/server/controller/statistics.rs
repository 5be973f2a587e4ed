use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, statistics::CountsDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::statistics::StatisticsService,
        state::AppState,
    },
};

/// Tag for grouping statistics endpoints in OpenAPI documentation
pub static STATISTICS_TAG: &str = "statistics";

/// Get the number of users, categories, books, chapters and episodes.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/statistics/counts",
    tag = STATISTICS_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Row counts", body = CountsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_counts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let counts = StatisticsService::new(&state.db).counts().await?;

    Ok((StatusCode::OK, Json(counts.into_dto())))
}
