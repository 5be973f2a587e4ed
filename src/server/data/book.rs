use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    collection::{self, Collection, ParsedQuery},
    data::TopToggle,
    model::book::{Book, CreateBookParams, UpdateBookParams},
};

pub struct BookRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BookRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateBookParams) -> Result<Book, DbErr> {
        let now = Utc::now();
        let entity = entity::book::ActiveModel {
            name: ActiveValue::Set(params.name),
            author: ActiveValue::Set(params.author),
            description: ActiveValue::Set(params.description),
            url: ActiveValue::Set(params.url),
            is_premium: ActiveValue::Set(params.is_premium),
            is_top10_year: ActiveValue::Set(false),
            category_id: ActiveValue::Set(params.category_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Book::from_entity(entity))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Book>, DbErr> {
        let entity = entity::prelude::Book::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Book::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Book::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn get_collection(
        &self,
        query: ParsedQuery<entity::book::Column>,
    ) -> Result<Collection<Book>, DbErr> {
        let collection = collection::collect(self.db, entity::prelude::Book::find(), query).await?;

        Ok(collection.map(Book::from_entity))
    }

    /// Gets every book ordered by name, for select inputs.
    pub async fn get_all_by_name(&self) -> Result<Vec<Book>, DbErr> {
        let entities = entity::prelude::Book::find()
            .order_by_asc(entity::book::Column::Name)
            .order_by_asc(entity::book::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Book::from_entity).collect())
    }

    /// Gets the books flagged as top of the year, most recently flagged first.
    pub async fn get_top(&self) -> Result<Vec<Book>, DbErr> {
        let entities = entity::prelude::Book::find()
            .filter(entity::book::Column::IsTop10Year.eq(true))
            .order_by_desc(entity::book::Column::UpdatedAt)
            .order_by_asc(entity::book::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Book::from_entity).collect())
    }

    /// Flips the top-of-the-year flag in one transaction.
    ///
    /// The row is written before counting so the write lock is held while the cap is checked;
    /// marking rolls back if more than `max` books would be flagged.
    pub async fn toggle_top(&self, id: i32, max: u64) -> Result<TopToggle<Book>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::Book::find_by_id(id).one(&txn).await? else {
            return Ok(TopToggle::Missing);
        };

        let marking = !existing.is_top10_year;
        let mut active = existing.into_active_model();
        active.is_top10_year = ActiveValue::Set(marking);
        active.updated_at = ActiveValue::Set(Utc::now());
        let updated = active.update(&txn).await?;

        if marking && count_top(&txn).await? > max {
            txn.rollback().await?;
            return Ok(TopToggle::CapReached);
        }

        txn.commit().await?;

        Ok(TopToggle::Toggled(Book::from_entity(updated)))
    }

    /// Applies the populated fields of `params` and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Book))` - Updated book
    /// - `Ok(None)` - No book with that id
    pub async fn update(&self, params: UpdateBookParams) -> Result<Option<Book>, DbErr> {
        let Some(existing) = entity::prelude::Book::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(author) = params.author {
            active.author = ActiveValue::Set(author);
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
        if let Some(category_id) = params.category_id {
            active.category_id = ActiveValue::Set(category_id);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Book::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Book::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

async fn count_top<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    entity::prelude::Book::find()
        .filter(entity::book::Column::IsTop10Year.eq(true))
        .count(db)
        .await
}
