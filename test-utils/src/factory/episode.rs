use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating episode entities.
pub struct EpisodeFactory<'a> {
    db: &'a DatabaseConnection,
    chapter_id: i32,
    title: String,
    album: String,
    artist: String,
    url: Option<String>,
    content: Option<String>,
    premium: bool,
    top: bool,
    created_at: DateTime<Utc>,
}

impl<'a> EpisodeFactory<'a> {
    /// Defaults: `"Episode {id}"` on `"Album {id}"` by `"Artist {id}"`, premium, no audio url.
    pub fn new(db: &'a DatabaseConnection, chapter_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            chapter_id,
            title: format!("Episode {}", id),
            album: format!("Album {}", id),
            artist: format!("Artist {}", id),
            url: None,
            content: None,
            premium: true,
            top: false,
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
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

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::episode::Model, DbErr> {
        entity::episode::ActiveModel {
            title: ActiveValue::Set(self.title),
            album: ActiveValue::Set(self.album),
            artist: ActiveValue::Set(self.artist),
            artwork: ActiveValue::Set(None),
            url: ActiveValue::Set(self.url),
            description: ActiveValue::Set(None),
            content: ActiveValue::Set(self.content),
            is_premium: ActiveValue::Set(self.premium),
            is_top: ActiveValue::Set(self.top),
            chapter_id: ActiveValue::Set(self.chapter_id),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_episode(
    db: &DatabaseConnection,
    chapter_id: i32,
) -> Result<entity::episode::Model, DbErr> {
    EpisodeFactory::new(db, chapter_id).build().await
}

#[cfg(test)]
mod tests {
    use crate::{builder::TestBuilder, factory::helpers::create_episode_with_dependencies};
    use sea_orm::DbErr;

    #[tokio::test]
    async fn creates_episode_hierarchy() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_content_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (category, book, chapter, episode) = create_episode_with_dependencies(db).await?;

        assert_eq!(book.category_id, category.id);
        assert_eq!(chapter.book_id, book.id);
        assert_eq!(episode.chapter_id, chapter.id);
        assert!(episode.is_premium);
        assert!(!episode.is_top);

        Ok(())
    }
}
