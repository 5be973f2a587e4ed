use sea_orm::DatabaseConnection;

use crate::server::{
    collection::{Collection, CollectionQuery},
    data::category::CategoryRepository,
    error::AppError,
    model::category::{
        Category, CategoryProperties, CreateCategoryParams, UpdateCategoryParams,
    },
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateCategoryParams) -> Result<Category, AppError> {
        let category = CategoryRepository::new(self.db).create(params).await?;

        tracing::info!(category_id = category.id, "Category created");

        Ok(category)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        Ok(CategoryRepository::new(self.db).get_by_id(id).await?)
    }

    /// Gets a filtered, sorted page of categories.
    pub async fn get_collection(
        &self,
        query: &CollectionQuery,
    ) -> Result<Collection<Category>, AppError> {
        let parsed = query.parse::<CategoryProperties>()?;

        Ok(CategoryRepository::new(self.db)
            .get_collection(parsed)
            .await?)
    }

    /// Gets every category ordered by name, for select inputs.
    pub async fn get_value_labels(&self) -> Result<Vec<Category>, AppError> {
        Ok(CategoryRepository::new(self.db).get_all_by_name().await?)
    }

    /// Returns None if the category doesn't exist
    pub async fn update(&self, params: UpdateCategoryParams) -> Result<Option<Category>, AppError> {
        Ok(CategoryRepository::new(self.db).update(params).await?)
    }

    /// Deletes a category together with its books, chapters and episodes.
    ///
    /// Returns false if the category doesn't exist
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let deleted = CategoryRepository::new(self.db).delete(id).await?;

        if deleted {
            tracing::info!(category_id = id, "Category deleted");
        }

        Ok(deleted)
    }
}
