use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{CollectionDto, ErrorDto, ValueLabelDto},
        category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    },
    server::{
        collection::CollectionQuery,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::category::{Category, CreateCategoryParams, UpdateCategoryParams},
        service::category::CategoryService,
        state::AppState,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

/// Create a category.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The created category
/// - `400 Bad Request` - Invalid category data
/// - `401 Unauthorized` / `403 Forbidden` - Not authenticated or not an admin
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    security(("bearer" = [])),
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let category = CategoryService::new(&state.db)
        .create(CreateCategoryParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(category.into_dto())))
}

/// List categories.
///
/// Supports `filter` on name and description, `sort` on name, and pagination.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    security(("bearer" = [])),
    params(CollectionQuery),
    responses(
        (status = 200, description = "Page of categories", body = CollectionDto<CategoryDto>),
        (status = 400, description = "Malformed filter, sort or pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CollectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let categories = CategoryService::new(&state.db)
        .get_collection(&query)
        .await?;

    Ok((StatusCode::OK, Json(categories.into_dto(Category::into_dto))))
}

/// List every category as `{ value, label }` pairs, ordered by name.
#[utoipa::path(
    get,
    path = "/api/categories/value-labels",
    tag = CATEGORY_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Category options", body = Vec<ValueLabelDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_category_value_labels(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let categories = CategoryService::new(&state.db).get_value_labels().await?;

    Ok((
        StatusCode::OK,
        Json(
            categories
                .into_iter()
                .map(Category::into_value_label)
                .collect::<Vec<_>>(),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "The category", body = CategoryDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_category_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    match CategoryService::new(&state.db).get_by_id(id).await? {
        Some(category) => Ok((StatusCode::OK, Json(category.into_dto()))),
        None => Err(AppError::NotFound("Category not found".to_string())),
    }
}

/// Update a category. Omitted fields are left unchanged.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let category = CategoryService::new(&state.db)
        .update(UpdateCategoryParams::from_dto(id, payload))
        .await?;

    match category {
        Some(category) => Ok((StatusCode::OK, Json(category.into_dto()))),
        None => Err(AppError::NotFound("Category not found".to_string())),
    }
}

/// Delete a category with all of its books, chapters and episodes.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    if CategoryService::new(&state.db).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Category not found".to_string()))
    }
}
