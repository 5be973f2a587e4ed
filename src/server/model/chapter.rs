use chrono::{DateTime, Utc};
use entity::chapter::Column;

use crate::{
    model::chapter::{ChapterDto, ChapterEpisodesDto, CreateChapterDto, UpdateChapterDto},
    server::{
        collection::{CollectionProperties, Field},
        model::{book::Book, episode::Episode},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: bool,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn from_entity(entity: entity::chapter::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            url: entity.url,
            is_premium: entity.is_premium,
            book_id: entity.book_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ChapterDto {
        ChapterDto {
            id: self.id,
            name: self.name,
            description: self.description,
            url: self.url,
            is_premium: self.is_premium,
            book_id: self.book_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A chapter with its parent book and its episodes, newest first.
#[derive(Debug, Clone)]
pub struct ChapterEpisodes {
    pub book: Book,
    pub chapter: Chapter,
    pub episodes: Vec<Episode>,
}

impl ChapterEpisodes {
    pub fn into_dto(self) -> ChapterEpisodesDto {
        ChapterEpisodesDto {
            book: self.book.into_dto(),
            chapter: self.chapter.into_dto(),
            episodes: self.episodes.into_iter().map(Episode::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateChapterParams {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: bool,
    pub book_id: i32,
}

impl CreateChapterParams {
    pub fn from_dto(dto: CreateChapterDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            url: dto.url,
            is_premium: dto.is_premium.unwrap_or(true),
            book_id: dto.book_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateChapterParams {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: Option<bool>,
    pub book_id: Option<i32>,
}

impl UpdateChapterParams {
    pub fn from_dto(id: i32, dto: UpdateChapterDto) -> Self {
        Self {
            id,
            name: dto.name,
            description: dto.description,
            url: dto.url,
            is_premium: dto.is_premium,
            book_id: dto.book_id,
        }
    }
}

pub struct ChapterProperties;

impl CollectionProperties for ChapterProperties {
    type Entity = entity::prelude::Chapter;

    const FIELDS: &'static [Field<Column>] = &[
        Field::text("name", Column::Name).folded(Column::NameSearch),
        Field::text("description", Column::Description)
            .folded(Column::DescriptionSearch)
            .unsortable(),
        Field::boolean("is_premium", Column::IsPremium),
        Field::integer("book_id", Column::BookId),
        Field::timestamp("created_at", Column::CreatedAt),
        Field::timestamp("updated_at", Column::UpdatedAt),
    ];

    fn id_column() -> Column {
        Column::Id
    }
}
