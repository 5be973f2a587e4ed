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
        episode::EpisodeDto,
        user::{CreateUserDto, ProfileDto, UpdateUserDto, UserDto},
    },
    server::{
        collection::CollectionQuery,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            episode::Episode,
            user::{UpdateUserParams, User},
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Create a user with any role.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The created user
/// - `400 Bad Request` - Invalid data or email already registered
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    security(("bearer" = [])),
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid data or user already exists", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let user = UserService::new(&state.db).create(payload).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// List users. Filterable on name, email and role.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(CollectionQuery),
    responses(
        (status = 200, description = "Page of users", body = CollectionDto<UserDto>),
        (status = 400, description = "Malformed filter, sort or pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CollectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db).get_collection(&query).await?;

    Ok((StatusCode::OK, Json(users.into_dto(User::into_dto))))
}

/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    match UserService::new(&state.db).get_by_id(id).await? {
        Some(user) => Ok((StatusCode::OK, Json(user.into_dto()))),
        None => Err(user_not_found()),
    }
}

/// Update a user's profile or role. Omitted fields are left unchanged.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Invalid data or email taken", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let user = UserService::new(&state.db)
        .update(UpdateUserParams::from_dto(id, payload))
        .await?;

    match user {
        Some(user) => Ok((StatusCode::OK, Json(user.into_dto()))),
        None => Err(user_not_found()),
    }
}

/// Delete a user together with their favorites and purchase records.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    if UserService::new(&state.db).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(user_not_found())
    }
}

/// Add an episode to the caller's favorites.
#[utoipa::path(
    patch,
    path = "/api/users/favorite/episode/{episode_id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(("episode_id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_favorite_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(episode_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db)
        .mark_favorite(user.id, episode_id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Remove an episode from the caller's favorites.
#[utoipa::path(
    patch,
    path = "/api/users/unmark-favorite/episode/{episode_id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(("episode_id" = i32, Path, description = "Episode ID")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Episode not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unmark_favorite_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(episode_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db)
        .unmark_favorite(user.id, episode_id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// List the caller's favorite episodes, most recently added first.
#[utoipa::path(
    get,
    path = "/api/users/favorite/episodes",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Favorite episodes", body = Vec<EpisodeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_favorite_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let episodes = UserService::new(&state.db)
        .get_favorite_episodes(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(episodes.into_iter().map(Episode::into_dto).collect::<Vec<_>>()),
    ))
}
