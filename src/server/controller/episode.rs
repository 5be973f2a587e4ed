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
        episode::{
            CreateEpisodeDto, EpisodeDetailDto, EpisodeDto, EpisodeSearchQuery, LyricsDto,
            LyricsQuery, UpdateEpisodeDto, UserEpisodeDto,
        },
    },
    server::{
        collection::CollectionQuery,
        data::episode::Neighbour,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::episode::{
            CreateEpisodeParams, Episode, EpisodeSearchParams, LyricLine, UpdateEpisodeParams,
            UserEpisode,
        },
        service::{episode::EpisodeService, transcription::TranscriptionService},
        state::AppState,
    },
};

/// Tag for grouping episode endpoints in OpenAPI documentation
pub static EPISODE_TAG: &str = "episode";

fn episode_not_found() -> AppError {
    AppError::NotFound("Episode not found".to_string())
}

/// Create an episode in an existing chapter.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/episodes",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    request_body = CreateEpisodeDto,
    responses(
        (status = 201, description = "Episode created", body = EpisodeDto),
        (status = 400, description = "Invalid episode data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateEpisodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let episode = EpisodeService::new(&state.db)
        .create(CreateEpisodeParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(episode.into_dto())))
}

/// List episodes.
///
/// Filterable on title, album, artist, description, is_premium, is_top and chapter_id.
#[utoipa::path(
    get,
    path = "/api/episodes",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(CollectionQuery),
    responses(
        (status = 200, description = "Page of episodes", body = CollectionDto<EpisodeDto>),
        (status = 400, description = "Malformed filter, sort or pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CollectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let episodes = EpisodeService::new(&state.db)
        .get_collection(&query)
        .await?;

    Ok((StatusCode::OK, Json(episodes.into_dto(Episode::into_dto))))
}

/// List episodes, each flagged with whether the caller favorited it.
#[utoipa::path(
    get,
    path = "/api/episodes/me",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(CollectionQuery),
    responses(
        (status = 200, description = "Page of episodes", body = CollectionDto<UserEpisodeDto>),
        (status = 400, description = "Malformed filter, sort or pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CollectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let episodes = EpisodeService::new(&state.db)
        .get_user_collection(user.id, &query)
        .await?;

    Ok((StatusCode::OK, Json(episodes.into_dto(UserEpisode::into_dto))))
}

/// Search episodes, newest first.
///
/// Text parameters match case-insensitive substrings. `category_id`, `book_id` and
/// `chapter_id` together select every episode under any of the given ancestors.
#[utoipa::path(
    get,
    path = "/api/episodes/search",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(EpisodeSearchQuery),
    responses(
        (status = 200, description = "Page of matching episodes", body = CollectionDto<EpisodeDto>),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EpisodeSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let episodes = EpisodeService::new(&state.db)
        .search(EpisodeSearchParams::from_query(query))
        .await?;

    Ok((StatusCode::OK, Json(episodes.into_dto(Episode::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/episodes/top",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Top episodes", body = Vec<EpisodeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_top_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let episodes = EpisodeService::new(&state.db).get_top().await?;

    Ok((
        StatusCode::OK,
        Json(episodes.into_iter().map(Episode::into_dto).collect::<Vec<_>>()),
    ))
}

/// Transcribe arbitrary audio into timed lyric lines.
///
/// # Returns
/// - `200 OK` - Lyric lines in playback order
/// - `400 Bad Request` - `audio_url` is not an http(s) URL
/// - `502 Bad Gateway` - Transcription provider failed
/// - `503 Service Unavailable` - Transcription not configured
#[utoipa::path(
    get,
    path = "/api/episodes/audio/lyrics",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(LyricsQuery),
    responses(
        (status = 200, description = "Timed lyric lines", body = LyricsDto),
        (status = 400, description = "Invalid audio url", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 502, description = "Transcription failed", body = ErrorDto),
        (status = 503, description = "Transcription not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_lyrics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LyricsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let lines = TranscriptionService::new(&state.db, state.transcriber.as_deref())
        .lyrics(&query.audio_url)
        .await?;

    Ok((
        StatusCode::OK,
        Json(LyricsDto {
            audio_url: query.audio_url,
            lines: lines.into_iter().map(LyricLine::into_dto).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/episodes/{id}",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "The episode", body = EpisodeDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_episode_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    match EpisodeService::new(&state.db).get_by_id(id).await? {
        Some(episode) => Ok((StatusCode::OK, Json(episode.into_dto()))),
        None => Err(episode_not_found()),
    }
}

/// Get an episode with its chapter, book and the caller's favorite flag.
#[utoipa::path(
    get,
    path = "/api/episodes/{id}/me",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Episode details", body = EpisodeDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_episode_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    match EpisodeService::new(&state.db).get_detail(user.id, id).await? {
        Some(detail) => Ok((StatusCode::OK, Json(detail.into_dto()))),
        None => Err(episode_not_found()),
    }
}

/// Get the next episode in the same chapter, or `null` at the end.
#[utoipa::path(
    get,
    path = "/api/episodes/{id}/next",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Next episode or null", body = Option<EpisodeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_next_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    neighbour_response(&state, &headers, id, Neighbour::Next).await
}

/// Get the previous episode in the same chapter, or `null` at the start.
#[utoipa::path(
    get,
    path = "/api/episodes/{id}/prev",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Previous episode or null", body = Option<EpisodeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_previous_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    neighbour_response(&state, &headers, id, Neighbour::Previous).await
}

async fn neighbour_response(
    state: &AppState,
    headers: &HeaderMap,
    id: i32,
    neighbour: Neighbour,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, headers)
        .require(&[])
        .await?;

    let episode = EpisodeService::new(&state.db)
        .get_neighbour(id, neighbour)
        .await?;

    Ok((StatusCode::OK, Json(episode.map(Episode::into_dto))))
}

/// Toggle whether an episode is marked as top.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - The updated episode
/// - `400 Bad Request` - Ten episodes are already marked
/// - `404 Not Found` - Episode does not exist
#[utoipa::path(
    patch,
    path = "/api/episodes/{id}/top",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Episode updated", body = EpisodeDto),
        (status = 400, description = "Top episode limit reached", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_top_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    match EpisodeService::new(&state.db).toggle_top(id).await? {
        Some(episode) => Ok((StatusCode::OK, Json(episode.into_dto()))),
        None => Err(episode_not_found()),
    }
}

/// Transcribe an episode's audio and store the text as its content.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - The episode with its transcript
/// - `400 Bad Request` - The episode has no audio url
/// - `502 Bad Gateway` - Transcription provider failed
/// - `503 Service Unavailable` - Transcription not configured
#[utoipa::path(
    post,
    path = "/api/episodes/{id}/transcribe",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Episode transcribed", body = EpisodeDto),
        (status = 400, description = "Episode has no audio url", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 502, description = "Transcription failed", body = ErrorDto),
        (status = 503, description = "Transcription not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn transcribe_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let episode = TranscriptionService::new(&state.db, state.transcriber.as_deref())
        .transcribe_episode(id)
        .await?;

    match episode {
        Some(episode) => Ok((StatusCode::OK, Json(episode.into_dto()))),
        None => Err(episode_not_found()),
    }
}

/// Update an episode. Omitted fields are left unchanged.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    patch,
    path = "/api/episodes/{id}",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    request_body = UpdateEpisodeDto,
    responses(
        (status = 200, description = "Episode updated", body = EpisodeDto),
        (status = 400, description = "Invalid episode data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Episode or chapter not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEpisodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let episode = EpisodeService::new(&state.db)
        .update(UpdateEpisodeParams::from_dto(id, payload))
        .await?;

    match episode {
        Some(episode) => Ok((StatusCode::OK, Json(episode.into_dto()))),
        None => Err(episode_not_found()),
    }
}

/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/episodes/{id}",
    tag = EPISODE_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 204, description = "Episode deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    if EpisodeService::new(&state.db).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(episode_not_found())
    }
}
