use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::{book::BookDto, episode::EpisodeDto};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChapterDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: bool,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A chapter together with its parent book and its episodes, newest first.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ChapterEpisodesDto {
    pub book: BookDto,
    pub chapter: ChapterDto,
    pub episodes: Vec<EpisodeDto>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateChapterDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub is_premium: Option<bool>,
    pub book_id: i32,
}

#[derive(Deserialize, ToSchema, Validate, Default)]
pub struct UpdateChapterDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub is_premium: Option<bool>,
    pub book_id: Option<i32>,
}
