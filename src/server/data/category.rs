use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder,
};

use crate::server::{
    collection::{self, Collection, ParsedQuery},
    model::category::{Category, CreateCategoryParams, UpdateCategoryParams},
};

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateCategoryParams) -> Result<Category, DbErr> {
        let entity = entity::category::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            url: ActiveValue::Set(params.url),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Category::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    /// Gets one page of categories matching the parsed collection query.
    pub async fn get_collection(
        &self,
        query: ParsedQuery<entity::category::Column>,
    ) -> Result<Collection<Category>, DbErr> {
        let collection =
            collection::collect(self.db, entity::prelude::Category::find(), query).await?;

        Ok(collection.map(Category::from_entity))
    }

    /// Gets every category ordered by name, for select inputs.
    pub async fn get_all_by_name(&self) -> Result<Vec<Category>, DbErr> {
        let entities = entity::prelude::Category::find()
            .order_by_asc(entity::category::Column::Name)
            .order_by_asc(entity::category::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Category::from_entity).collect())
    }

    /// Applies the populated fields of `params`.
    ///
    /// # Returns
    /// - `Ok(Some(Category))` - Updated category
    /// - `Ok(None)` - No category with that id
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, params: UpdateCategoryParams) -> Result<Option<Category>, DbErr> {
        let Some(existing) = entity::prelude::Category::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = existing.clone().into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(url) = params.url {
            active.url = ActiveValue::Set(Some(url));
        }

        if !active.is_changed() {
            return Ok(Some(Category::from_entity(existing)));
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Category::from_entity(entity)))
    }

    /// Deletes a category; its books, chapters and episodes cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Category was deleted
    /// - `Ok(false)` - No category with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Category::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
