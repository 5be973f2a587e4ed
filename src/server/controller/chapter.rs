use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{CollectionDto, ErrorDto},
        chapter::{ChapterDto, ChapterEpisodesDto, CreateChapterDto, UpdateChapterDto},
    },
    server::{
        collection::CollectionQuery,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::chapter::{Chapter, CreateChapterParams, UpdateChapterParams},
        service::chapter::ChapterService,
        state::AppState,
    },
};

/// Tag for grouping chapter endpoints in OpenAPI documentation
pub static CHAPTER_TAG: &str = "chapter";

/// Create a chapter in an existing book.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/chapters",
    tag = CHAPTER_TAG,
    security(("bearer" = [])),
    request_body = CreateChapterDto,
    responses(
        (status = 201, description = "Chapter created", body = ChapterDto),
        (status = 400, description = "Invalid chapter data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateChapterDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let chapter = ChapterService::new(&state.db)
        .create(CreateChapterParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(chapter.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/chapters",
    tag = CHAPTER_TAG,
    security(("bearer" = [])),
    params(CollectionQuery),
    responses(
        (status = 200, description = "Page of chapters", body = CollectionDto<ChapterDto>),
        (status = 400, description = "Malformed filter, sort or pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_chapters(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CollectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let chapters = ChapterService::new(&state.db)
        .get_collection(&query)
        .await?;

    Ok((StatusCode::OK, Json(chapters.into_dto(Chapter::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/chapters/{id}",
    tag = CHAPTER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "The chapter", body = ChapterDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_chapter_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    match ChapterService::new(&state.db).get_by_id(id).await? {
        Some(chapter) => Ok((StatusCode::OK, Json(chapter.into_dto()))),
        None => Err(AppError::NotFound("Chapter not found".to_string())),
    }
}

/// Get a chapter with its book and episodes, newest episode first.
#[utoipa::path(
    get,
    path = "/api/chapters/{id}/episodes",
    tag = CHAPTER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter with episodes", body = ChapterEpisodesDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_chapter_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    match ChapterService::new(&state.db).get_with_episodes(id).await? {
        Some(chapter) => Ok((StatusCode::OK, Json(chapter.into_dto()))),
        None => Err(AppError::NotFound("Chapter not found".to_string())),
    }
}

/// Update a chapter. Omitted fields are left unchanged.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    patch,
    path = "/api/chapters/{id}",
    tag = CHAPTER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Chapter ID")),
    request_body = UpdateChapterDto,
    responses(
        (status = 200, description = "Chapter updated", body = ChapterDto),
        (status = 400, description = "Invalid chapter data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Chapter or book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateChapterDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let chapter = ChapterService::new(&state.db)
        .update(UpdateChapterParams::from_dto(id, payload))
        .await?;

    match chapter {
        Some(chapter) => Ok((StatusCode::OK, Json(chapter.into_dto()))),
        None => Err(AppError::NotFound("Chapter not found".to_string())),
    }
}

/// Delete a chapter with its episodes.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/chapters/{id}",
    tag = CHAPTER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Chapter ID")),
    responses(
        (status = 204, description = "Chapter deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    if ChapterService::new(&state.db).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Chapter not found".to_string()))
    }
}
