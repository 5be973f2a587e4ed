//! Application state shared across all request handlers.
//!
//! Built once during startup and cloned into each handler through Axum's state extraction.
//! Optional integrations are `None` when their credentials are not configured; handlers that
//! need them answer 503.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::{
    auth::token::TokenService, iap::google_play::GooglePlayDatasource, mail::Mailer,
    transcription::Transcriber,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - Services are behind `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for outgoing API requests. Redirects are disabled.
    pub http_client: reqwest::Client,

    /// Signs and verifies access and refresh tokens.
    pub tokens: Arc<TokenService>,

    /// Delivers password-reset codes.
    pub mailer: Arc<dyn Mailer>,

    /// Speech-to-text provider, when `ASSEMBLYAI_API_KEY` is set.
    pub transcriber: Option<Arc<dyn Transcriber>>,

    /// Google Play Developer API, when service-account credentials are set.
    pub play_store: Option<Arc<dyn GooglePlayDatasource>>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            db,
            http_client,
            tokens: Arc::new(tokens),
            mailer,
            transcriber: None,
            play_store: None,
        }
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_play_store(mut self, play_store: Arc<dyn GooglePlayDatasource>) -> Self {
        self.play_store = Some(play_store);
        self
    }
}
