use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    model::{book::BookDto, chapter::ChapterDto},
    server::collection::DEFAULT_LIMIT,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EpisodeDto {
    pub id: i32,
    pub title: String,
    pub album: String,
    pub artist: String,
    pub artwork: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub is_premium: bool,
    pub is_top: bool,
    pub chapter_id: i32,
    pub created_at: DateTime<Utc>,
}

/// An episode annotated for the requesting user.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserEpisodeDto {
    #[serde(flatten)]
    pub episode: EpisodeDto,
    pub is_favorite: bool,
}

/// An episode with its chapter and book, annotated for the requesting user.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct EpisodeDetailDto {
    pub episode: EpisodeDto,
    pub chapter: ChapterDto,
    pub book: BookDto,
    pub is_favorite: bool,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateEpisodeDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub album: String,
    #[validate(length(min = 1, max = 200))]
    pub artist: String,
    #[validate(url)]
    pub artwork: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub content: Option<String>,
    pub is_premium: Option<bool>,
    pub chapter_id: i32,
}

#[derive(Deserialize, ToSchema, Validate, Default)]
pub struct UpdateEpisodeDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub album: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub artist: Option<String>,
    #[validate(url)]
    pub artwork: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub content: Option<String>,
    pub is_premium: Option<bool>,
    pub chapter_id: Option<i32>,
}

/// Query string for episode search.
///
/// Text fields match case-insensitive substrings. `category_id`, `book_id` and `chapter_id`
/// each select the episodes beneath that node; when several are given their episodes are
/// combined.
#[derive(Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct EpisodeSearchQuery {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub is_premium: Option<bool>,
    pub is_top: Option<bool>,
    pub category_id: Option<i32>,
    pub book_id: Option<i32>,
    pub chapter_id: Option<i32>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LyricsQuery {
    pub audio_url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct LyricLineDto {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LyricsDto {
    pub audio_url: String,
    pub lines: Vec<LyricLineDto>,
}
