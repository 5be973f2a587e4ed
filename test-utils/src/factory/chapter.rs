use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating chapter entities.
pub struct ChapterFactory<'a> {
    db: &'a DatabaseConnection,
    book_id: i32,
    name: String,
    premium: bool,
}

impl<'a> ChapterFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, book_id: i32) -> Self {
        Self {
            db,
            book_id,
            name: format!("Chapter {}", next_id()),
            premium: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    pub async fn build(self) -> Result<entity::chapter::Model, DbErr> {
        let now = Utc::now();
        entity::chapter::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            url: ActiveValue::Set(None),
            is_premium: ActiveValue::Set(self.premium),
            book_id: ActiveValue::Set(self.book_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_chapter(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<entity::chapter::Model, DbErr> {
    ChapterFactory::new(db, book_id).build().await
}
