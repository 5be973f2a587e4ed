use entity::category::Column;

use crate::{
    model::{
        api::ValueLabelDto,
        category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    },
    server::collection::{CollectionProperties, Field},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl Category {
    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            url: entity.url,
        }
    }

    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name,
            description: self.description,
            url: self.url,
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
pub struct CreateCategoryParams {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl CreateCategoryParams {
    pub fn from_dto(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            url: dto.url,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryParams {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl UpdateCategoryParams {
    pub fn from_dto(id: i32, dto: UpdateCategoryDto) -> Self {
        Self {
            id,
            name: dto.name,
            description: dto.description,
            url: dto.url,
        }
    }
}

pub struct CategoryProperties;

impl CollectionProperties for CategoryProperties {
    type Entity = entity::prelude::Category;

    const FIELDS: &'static [Field<Column>] = &[
        Field::text("name", Column::Name).folded(Column::NameSearch),
        Field::text("description", Column::Description)
            .folded(Column::DescriptionSearch)
            .unsortable(),
    ];

    fn id_column() -> Column {
        Column::Id
    }
}
