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
        book::{BookDto, CreateBookDto, UpdateBookDto},
    },
    server::{
        collection::CollectionQuery,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::book::{Book, CreateBookParams, UpdateBookParams},
        service::book::BookService,
        state::AppState,
    },
};

/// Tag for grouping book endpoints in OpenAPI documentation
pub static BOOK_TAG: &str = "book";

/// Create a book in an existing category.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The created book
/// - `400 Bad Request` - Invalid book data
/// - `404 Not Found` - Category does not exist
#[utoipa::path(
    post,
    path = "/api/books",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid book data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let book = BookService::new(&state.db)
        .create(CreateBookParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(book.into_dto())))
}

/// List books.
///
/// Filterable on name, author, description, is_premium, is_top10_year and category_id.
#[utoipa::path(
    get,
    path = "/api/books",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(CollectionQuery),
    responses(
        (status = 200, description = "Page of books", body = CollectionDto<BookDto>),
        (status = 400, description = "Malformed filter, sort or pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_books(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CollectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let books = BookService::new(&state.db).get_collection(&query).await?;

    Ok((StatusCode::OK, Json(books.into_dto(Book::into_dto))))
}

#[utoipa::path(
    get,
    path = "/api/books/value-labels",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Book options ordered by name", body = Vec<ValueLabelDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book_value_labels(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let books = BookService::new(&state.db).get_value_labels().await?;

    Ok((
        StatusCode::OK,
        Json(
            books
                .into_iter()
                .map(Book::into_value_label)
                .collect::<Vec<_>>(),
        ),
    ))
}

/// List the books marked as top of the year.
#[utoipa::path(
    get,
    path = "/api/books/top",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Top books", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_top_books(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let books = BookService::new(&state.db).get_top().await?;

    Ok((
        StatusCode::OK,
        Json(books.into_iter().map(Book::into_dto).collect::<Vec<_>>()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "The book", body = BookDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_book_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    match BookService::new(&state.db).get_by_id(id).await? {
        Some(book) => Ok((StatusCode::OK, Json(book.into_dto()))),
        None => Err(AppError::NotFound("Book not found".to_string())),
    }
}

/// Toggle whether a book is in the top of the year.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - The updated book
/// - `400 Bad Request` - Ten books are already marked
/// - `404 Not Found` - Book does not exist
#[utoipa::path(
    patch,
    path = "/api/books/{id}/top",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Top book limit reached", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_top_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    match BookService::new(&state.db).toggle_top(id).await? {
        Some(book) => Ok((StatusCode::OK, Json(book.into_dto()))),
        None => Err(AppError::NotFound("Book not found".to_string())),
    }
}

/// Update a book. Omitted fields are left unchanged.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid book data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book or category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let book = BookService::new(&state.db)
        .update(UpdateBookParams::from_dto(id, payload))
        .await?;

    match book {
        Some(book) => Ok((StatusCode::OK, Json(book.into_dto()))),
        None => Err(AppError::NotFound("Book not found".to_string())),
    }
}

/// Delete a book with its chapters and episodes.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = BOOK_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Book not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    if BookService::new(&state.db).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Book not found".to_string()))
    }
}
