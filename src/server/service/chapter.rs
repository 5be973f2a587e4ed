use sea_orm::DatabaseConnection;

use crate::server::{
    collection::{Collection, CollectionQuery},
    data::{book::BookRepository, chapter::ChapterRepository, episode::EpisodeRepository},
    error::AppError,
    model::chapter::{
        Chapter, ChapterEpisodes, ChapterProperties, CreateChapterParams, UpdateChapterParams,
    },
};

pub struct ChapterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChapterService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(Chapter)` - The created chapter
    /// - `Err(AppError::NotFound)` - The book doesn't exist
    pub async fn create(&self, params: CreateChapterParams) -> Result<Chapter, AppError> {
        self.ensure_book(params.book_id).await?;

        let chapter = ChapterRepository::new(self.db).create(params).await?;

        tracing::info!(chapter_id = chapter.id, "Chapter created");

        Ok(chapter)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Chapter>, AppError> {
        Ok(ChapterRepository::new(self.db).get_by_id(id).await?)
    }

    pub async fn get_collection(
        &self,
        query: &CollectionQuery,
    ) -> Result<Collection<Chapter>, AppError> {
        let parsed = query.parse::<ChapterProperties>()?;

        Ok(ChapterRepository::new(self.db)
            .get_collection(parsed)
            .await?)
    }

    /// Gets a chapter with its book and episodes, newest episode first.
    ///
    /// Returns None if the chapter doesn't exist
    pub async fn get_with_episodes(&self, id: i32) -> Result<Option<ChapterEpisodes>, AppError> {
        let Some(chapter) = ChapterRepository::new(self.db).get_by_id(id).await? else {
            return Ok(None);
        };

        // Chapters cascade with their book, so a missing parent means the row is mid-delete.
        let book = BookRepository::new(self.db)
            .get_by_id(chapter.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", chapter.book_id)))?;

        let episodes = EpisodeRepository::new(self.db)
            .get_by_chapter(chapter.id)
            .await?;

        Ok(Some(ChapterEpisodes {
            book,
            chapter,
            episodes,
        }))
    }

    pub async fn update(&self, params: UpdateChapterParams) -> Result<Option<Chapter>, AppError> {
        if let Some(book_id) = params.book_id {
            self.ensure_book(book_id).await?;
        }

        Ok(ChapterRepository::new(self.db).update(params).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(ChapterRepository::new(self.db).delete(id).await?)
    }

    async fn ensure_book(&self, book_id: i32) -> Result<(), AppError> {
        if !BookRepository::new(self.db).exists(book_id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }

        Ok(())
    }
}
