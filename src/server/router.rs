//! Route table, CORS, request tracing and API documentation.

use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, book, category, chapter, episode, iap, statistics, user},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "podcast", description = "Podcast and audiobook content API"),
    modifiers(&BearerSecurity),
    paths(
        auth::sign_up,
        auth::sign_in,
        auth::logout,
        auth::refresh,
        auth::me,
        auth::change_password,
        auth::forgot_password,
        auth::reset_password,
        user::create_user,
        user::get_users,
        user::get_user_by_id,
        user::update_user,
        user::delete_user,
        user::mark_favorite_episode,
        user::unmark_favorite_episode,
        user::get_favorite_episodes,
        category::create_category,
        category::get_categories,
        category::get_category_value_labels,
        category::get_category_by_id,
        category::update_category,
        category::delete_category,
        book::create_book,
        book::get_books,
        book::get_book_value_labels,
        book::get_top_books,
        book::get_book_by_id,
        book::toggle_top_book,
        book::update_book,
        book::delete_book,
        chapter::create_chapter,
        chapter::get_chapters,
        chapter::get_chapter_by_id,
        chapter::get_chapter_episodes,
        chapter::update_chapter,
        chapter::delete_chapter,
        episode::create_episode,
        episode::get_episodes,
        episode::get_user_episodes,
        episode::search_episodes,
        episode::get_top_episodes,
        episode::get_lyrics,
        episode::get_episode_by_id,
        episode::get_episode_detail,
        episode::get_next_episode,
        episode::get_previous_episode,
        episode::toggle_top_episode,
        episode::transcribe_episode,
        episode::update_episode,
        episode::delete_episode,
        iap::verify_android_receipt,
        statistics::get_counts,
    ),
)]
pub struct ApiDoc;

/// Registers the `bearer` JWT scheme referenced by protected paths.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::sign_up))
        .route("/api/auth/signin", post(auth::sign_in))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/refresh", get(auth::refresh))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/change-password", patch(auth::change_password))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/users", post(user::create_user).get(user::get_users))
        .route(
            "/api/users/{id}",
            get(user::get_user_by_id)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        .route(
            "/api/users/favorite/episode/{episode_id}",
            patch(user::mark_favorite_episode),
        )
        .route(
            "/api/users/unmark-favorite/episode/{episode_id}",
            patch(user::unmark_favorite_episode),
        )
        .route(
            "/api/users/favorite/episodes",
            get(user::get_favorite_episodes),
        )
        .route(
            "/api/categories",
            post(category::create_category).get(category::get_categories),
        )
        .route(
            "/api/categories/value-labels",
            get(category::get_category_value_labels),
        )
        .route(
            "/api/categories/{id}",
            get(category::get_category_by_id)
                .patch(category::update_category)
                .delete(category::delete_category),
        )
        .route("/api/books", post(book::create_book).get(book::get_books))
        .route("/api/books/value-labels", get(book::get_book_value_labels))
        .route("/api/books/top", get(book::get_top_books))
        .route(
            "/api/books/{id}",
            get(book::get_book_by_id)
                .patch(book::update_book)
                .delete(book::delete_book),
        )
        .route("/api/books/{id}/top", patch(book::toggle_top_book))
        .route(
            "/api/chapters",
            post(chapter::create_chapter).get(chapter::get_chapters),
        )
        .route(
            "/api/chapters/{id}",
            get(chapter::get_chapter_by_id)
                .patch(chapter::update_chapter)
                .delete(chapter::delete_chapter),
        )
        .route(
            "/api/chapters/{id}/episodes",
            get(chapter::get_chapter_episodes),
        )
        .route(
            "/api/episodes",
            post(episode::create_episode).get(episode::get_episodes),
        )
        .route("/api/episodes/me", get(episode::get_user_episodes))
        .route("/api/episodes/search", get(episode::search_episodes))
        .route("/api/episodes/top", get(episode::get_top_episodes))
        .route("/api/episodes/audio/lyrics", get(episode::get_lyrics))
        .route(
            "/api/episodes/{id}",
            get(episode::get_episode_by_id)
                .patch(episode::update_episode)
                .delete(episode::delete_episode),
        )
        .route("/api/episodes/{id}/me", get(episode::get_episode_detail))
        .route("/api/episodes/{id}/next", get(episode::get_next_episode))
        .route("/api/episodes/{id}/prev", get(episode::get_previous_episode))
        .route("/api/episodes/{id}/top", patch(episode::toggle_top_episode))
        .route(
            "/api/episodes/{id}/transcribe",
            post(episode::transcribe_episode),
        )
        .route(
            "/api/iap/verify-receipt/android",
            post(iap::verify_android_receipt),
        )
        .route("/api/statistics/counts", get(statistics::get_counts))
}

/// Builds the full application: API routes, Swagger UI, CORS and request tracing.
pub fn app(state: AppState, cors_allowed_origins: &[String]) -> Router {
    router()
        .with_state(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Restricts CORS to the configured origins, or allows any origin when none are set.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new().allow_headers(Any).allow_methods(Any);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
