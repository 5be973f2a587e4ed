use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
};

use crate::server::{
    collection::{self, Collection, ParsedQuery},
    model::chapter::{Chapter, CreateChapterParams, UpdateChapterParams},
};

pub struct ChapterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChapterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateChapterParams) -> Result<Chapter, DbErr> {
        let now = Utc::now();
        let entity = entity::chapter::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            url: ActiveValue::Set(params.url),
            is_premium: ActiveValue::Set(params.is_premium),
            book_id: ActiveValue::Set(params.book_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Chapter::from_entity(entity))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Chapter>, DbErr> {
        let entity = entity::prelude::Chapter::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Chapter::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Chapter::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn get_collection(
        &self,
        query: ParsedQuery<entity::chapter::Column>,
    ) -> Result<Collection<Chapter>, DbErr> {
        let collection =
            collection::collect(self.db, entity::prelude::Chapter::find(), query).await?;

        Ok(collection.map(Chapter::from_entity))
    }

    pub async fn update(&self, params: UpdateChapterParams) -> Result<Option<Chapter>, DbErr> {
        let Some(existing) = entity::prelude::Chapter::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(url) = params.url {
            active.url = ActiveValue::Set(Some(url));
        }
        if let Some(is_premium) = params.is_premium {
            active.is_premium = ActiveValue::Set(is_premium);
        }
        if let Some(book_id) = params.book_id {
            active.book_id = ActiveValue::Set(book_id);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Chapter::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Chapter::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
