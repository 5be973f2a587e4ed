use chrono::{DateTime, Utc};
use entity::episode::Column;

use crate::{
    model::episode::{
        CreateEpisodeDto, EpisodeDetailDto, EpisodeDto, EpisodeSearchQuery, LyricLineDto,
        UpdateEpisodeDto, UserEpisodeDto,
    },
    server::{
        collection::{CollectionProperties, Field},
        model::{book::Book, chapter::Chapter},
    },
};

/// Most episodes that may be flagged as top at once.
pub const MAX_TOP_EPISODES: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
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

impl Episode {
    pub fn from_entity(entity: entity::episode::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            album: entity.album,
            artist: entity.artist,
            artwork: entity.artwork,
            url: entity.url,
            description: entity.description,
            content: entity.content,
            is_premium: entity.is_premium,
            is_top: entity.is_top,
            chapter_id: entity.chapter_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> EpisodeDto {
        EpisodeDto {
            id: self.id,
            title: self.title,
            album: self.album,
            artist: self.artist,
            artwork: self.artwork,
            url: self.url,
            description: self.description,
            content: self.content,
            is_premium: self.is_premium,
            is_top: self.is_top,
            chapter_id: self.chapter_id,
            created_at: self.created_at,
        }
    }
}

/// An episode annotated with whether the requesting user favorited it.
#[derive(Debug, Clone)]
pub struct UserEpisode {
    pub episode: Episode,
    pub is_favorite: bool,
}

impl UserEpisode {
    pub fn into_dto(self) -> UserEpisodeDto {
        UserEpisodeDto {
            episode: self.episode.into_dto(),
            is_favorite: self.is_favorite,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EpisodeDetail {
    pub episode: Episode,
    pub chapter: Chapter,
    pub book: Book,
    pub is_favorite: bool,
}

impl EpisodeDetail {
    pub fn into_dto(self) -> EpisodeDetailDto {
        EpisodeDetailDto {
            episode: self.episode.into_dto(),
            chapter: self.chapter.into_dto(),
            book: self.book.into_dto(),
            is_favorite: self.is_favorite,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEpisodeParams {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub artwork: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub is_premium: bool,
    pub chapter_id: i32,
}

impl CreateEpisodeParams {
    pub fn from_dto(dto: CreateEpisodeDto) -> Self {
        Self {
            title: dto.title,
            album: dto.album,
            artist: dto.artist,
            artwork: dto.artwork,
            url: dto.url,
            description: dto.description,
            content: dto.content,
            is_premium: dto.is_premium.unwrap_or(true),
            chapter_id: dto.chapter_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEpisodeParams {
    pub id: i32,
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub artwork: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub is_premium: Option<bool>,
    pub chapter_id: Option<i32>,
}

impl UpdateEpisodeParams {
    pub fn from_dto(id: i32, dto: UpdateEpisodeDto) -> Self {
        Self {
            id,
            title: dto.title,
            album: dto.album,
            artist: dto.artist,
            artwork: dto.artwork,
            url: dto.url,
            description: dto.description,
            content: dto.content,
            is_premium: dto.is_premium,
            chapter_id: dto.chapter_id,
        }
    }
}

/// Search criteria; every populated field narrows the result.
#[derive(Debug, Clone, Default)]
pub struct EpisodeSearchParams {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub is_premium: Option<bool>,
    pub is_top: Option<bool>,
    pub category_id: Option<i32>,
    pub book_id: Option<i32>,
    pub chapter_id: Option<i32>,
    pub page: u64,
    pub limit: u64,
}

impl EpisodeSearchParams {
    pub fn from_query(query: EpisodeSearchQuery) -> Self {
        // Blank text inputs from search forms mean "no constraint".
        let text = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            title: text(query.title),
            album: text(query.album),
            artist: text(query.artist),
            description: text(query.description),
            is_premium: query.is_premium,
            is_top: query.is_top,
            category_id: query.category_id,
            book_id: query.book_id,
            chapter_id: query.chapter_id,
            page: query.page,
            limit: query.limit,
        }
    }

    pub fn has_hierarchy_filter(&self) -> bool {
        self.category_id.is_some() || self.book_id.is_some() || self.chapter_id.is_some()
    }
}

/// A line of transcript with its time span in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

impl LyricLine {
    pub fn into_dto(self) -> LyricLineDto {
        LyricLineDto {
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            text: self.text,
        }
    }
}

pub struct EpisodeProperties;

impl CollectionProperties for EpisodeProperties {
    type Entity = entity::prelude::Episode;

    const FIELDS: &'static [Field<Column>] = &[
        Field::text("title", Column::Title).folded(Column::TitleSearch),
        Field::text("album", Column::Album).folded(Column::AlbumSearch),
        Field::text("artist", Column::Artist).folded(Column::ArtistSearch),
        Field::text("description", Column::Description)
            .folded(Column::DescriptionSearch)
            .unsortable(),
        Field::boolean("is_premium", Column::IsPremium),
        Field::boolean("is_top", Column::IsTop),
        Field::integer("chapter_id", Column::ChapterId),
        Field::timestamp("created_at", Column::CreatedAt),
    ];

    fn id_column() -> Column {
        Column::Id
    }
}
