use chrono::{DateTime, Utc};
use entity::book::Column;

use crate::{
    model::{
        api::ValueLabelDto,
        book::{BookDto, CreateBookDto, UpdateBookDto},
    },
    server::collection::{CollectionProperties, Field},
};

/// Most books that may be flagged as top of the year at once.
pub const MAX_TOP_BOOKS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: bool,
    pub is_top10_year: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn from_entity(entity: entity::book::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            author: entity.author,
            description: entity.description,
            url: entity.url,
            is_premium: entity.is_premium,
            is_top10_year: entity.is_top10_year,
            category_id: entity.category_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> BookDto {
        BookDto {
            id: self.id,
            name: self.name,
            author: self.author,
            description: self.description,
            url: self.url,
            is_premium: self.is_premium,
            is_top10_year: self.is_top10_year,
            category_id: self.category_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_value_label(self) -> ValueLabelDto {
        ValueLabelDto {
            value: self.id,
            label: self.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookParams {
    pub name: String,
    pub author: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: bool,
    pub category_id: i32,
}

impl CreateBookParams {
    pub fn from_dto(dto: CreateBookDto) -> Self {
        Self {
            name: dto.name,
            author: dto.author,
            description: dto.description,
            url: dto.url,
            is_premium: dto.is_premium.unwrap_or(true),
            category_id: dto.category_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBookParams {
    pub id: i32,
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: Option<bool>,
    pub category_id: Option<i32>,
}

impl UpdateBookParams {
    pub fn from_dto(id: i32, dto: UpdateBookDto) -> Self {
        Self {
            id,
            name: dto.name,
            author: dto.author,
            description: dto.description,
            url: dto.url,
            is_premium: dto.is_premium,
            category_id: dto.category_id,
        }
    }
}

pub struct BookProperties;

impl CollectionProperties for BookProperties {
    type Entity = entity::prelude::Book;

    const FIELDS: &'static [Field<Column>] = &[
        Field::text("name", Column::Name).folded(Column::NameSearch),
        Field::text("author", Column::Author).folded(Column::AuthorSearch),
        Field::text("description", Column::Description)
            .folded(Column::DescriptionSearch)
            .unsortable(),
        Field::boolean("is_premium", Column::IsPremium),
        Field::boolean("is_top10_year", Column::IsTop10Year),
        Field::integer("category_id", Column::CategoryId),
        Field::timestamp("created_at", Column::CreatedAt),
        Field::timestamp("updated_at", Column::UpdatedAt),
    ];

    fn id_column() -> Column {
        Column::Id
    }
}
