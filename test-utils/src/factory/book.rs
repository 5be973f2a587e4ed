use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating book entities.
pub struct BookFactory<'a> {
    db: &'a DatabaseConnection,
    category_id: i32,
    name: String,
    author: String,
    premium: bool,
    top: bool,
}

impl<'a> BookFactory<'a> {
    /// Defaults: `"Book {id}"` by `"Author {id}"`, premium, not in the top list.
    pub fn new(db: &'a DatabaseConnection, category_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            category_id,
            name: format!("Book {}", id),
            author: format!("Author {}", id),
            premium: true,
            top: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    pub fn top(mut self, top: bool) -> Self {
        self.top = top;
        self
    }

    pub async fn build(self) -> Result<entity::book::Model, DbErr> {
        let now = Utc::now();
        entity::book::ActiveModel {
            name: ActiveValue::Set(self.name),
            author: ActiveValue::Set(self.author),
            description: ActiveValue::Set(None),
            url: ActiveValue::Set(None),
            is_premium: ActiveValue::Set(self.premium),
            is_top10_year: ActiveValue::Set(self.top),
            category_id: ActiveValue::Set(self.category_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_book(
    db: &DatabaseConnection,
    category_id: i32,
) -> Result<entity::book::Model, DbErr> {
    BookFactory::new(db, category_id).build().await
}
