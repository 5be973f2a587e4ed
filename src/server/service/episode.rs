use sea_orm::DatabaseConnection;

use crate::server::{
    collection::{validate_limit, validate_page, Collection, CollectionQuery},
    data::{
        book::BookRepository,
        chapter::ChapterRepository,
        episode::{EpisodeRepository, Neighbour},
        favorite::FavoriteRepository,
        TopToggle,
    },
    error::AppError,
    model::episode::{
        CreateEpisodeParams, Episode, EpisodeDetail, EpisodeProperties, EpisodeSearchParams,
        UpdateEpisodeParams, UserEpisode, MAX_TOP_EPISODES,
    },
};

pub struct EpisodeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EpisodeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(Episode)` - The created episode
    /// - `Err(AppError::NotFound)` - The chapter doesn't exist
    pub async fn create(&self, params: CreateEpisodeParams) -> Result<Episode, AppError> {
        self.ensure_chapter(params.chapter_id).await?;

        let episode = EpisodeRepository::new(self.db).create(params).await?;

        tracing::info!(episode_id = episode.id, "Episode created");

        Ok(episode)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Episode>, AppError> {
        Ok(EpisodeRepository::new(self.db).get_by_id(id).await?)
    }

    pub async fn get_collection(
        &self,
        query: &CollectionQuery,
    ) -> Result<Collection<Episode>, AppError> {
        let parsed = query.parse::<EpisodeProperties>()?;

        Ok(EpisodeRepository::new(self.db)
            .get_collection(parsed)
            .await?)
    }

    /// Gets a collection page with each episode flagged if `user_id` favorited it.
    pub async fn get_user_collection(
        &self,
        user_id: i32,
        query: &CollectionQuery,
    ) -> Result<Collection<UserEpisode>, AppError> {
        let episodes = self.get_collection(query).await?;

        let ids: Vec<i32> = episodes.items.iter().map(|e| e.id).collect();
        let favorites = FavoriteRepository::new(self.db)
            .get_favorited_among(user_id, &ids)
            .await?;

        Ok(episodes.map(|episode| UserEpisode {
            is_favorite: favorites.contains(&episode.id),
            episode,
        }))
    }

    pub async fn search(&self, params: EpisodeSearchParams) -> Result<Collection<Episode>, AppError> {
        validate_limit(params.limit)?;
        validate_page(params.page, params.limit)?;

        Ok(EpisodeRepository::new(self.db).search(params).await?)
    }

    pub async fn get_top(&self) -> Result<Vec<Episode>, AppError> {
        Ok(EpisodeRepository::new(self.db).get_top().await?)
    }

    /// Gets an episode with its chapter, book and the user's favorite flag.
    ///
    /// Returns None if the episode doesn't exist
    pub async fn get_detail(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<Option<EpisodeDetail>, AppError> {
        let Some(episode) = EpisodeRepository::new(self.db).get_by_id(id).await? else {
            return Ok(None);
        };

        let chapter = ChapterRepository::new(self.db)
            .get_by_id(episode.chapter_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Chapter {} not found", episode.chapter_id))
            })?;
        let book = BookRepository::new(self.db)
            .get_by_id(chapter.book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", chapter.book_id)))?;
        let is_favorite = FavoriteRepository::new(self.db)
            .is_favorite(user_id, episode.id)
            .await?;

        Ok(Some(EpisodeDetail {
            episode,
            chapter,
            book,
            is_favorite,
        }))
    }

    /// Gets the next or previous episode in the same chapter.
    ///
    /// # Returns
    /// - `Ok(Some(Episode))` - The neighbour
    /// - `Ok(None)` - The episode is at that end of its chapter
    /// - `Err(AppError::NotFound)` - The episode doesn't exist
    pub async fn get_neighbour(
        &self,
        id: i32,
        neighbour: Neighbour,
    ) -> Result<Option<Episode>, AppError> {
        let repo = EpisodeRepository::new(self.db);

        let episode = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Episode {} not found", id)))?;

        Ok(repo.get_neighbour(&episode, neighbour).await?)
    }

    /// Flips the episode's top flag.
    ///
    /// # Returns
    /// - `Ok(Some(Episode))` - The updated episode
    /// - `Ok(None)` - The episode doesn't exist
    /// - `Err(AppError::BadRequest)` - Marking would exceed `MAX_TOP_EPISODES`
    pub async fn toggle_top(&self, id: i32) -> Result<Option<Episode>, AppError> {
        match EpisodeRepository::new(self.db).toggle_top(id, MAX_TOP_EPISODES).await? {
            TopToggle::Toggled(episode) => Ok(Some(episode)),
            TopToggle::Missing => Ok(None),
            TopToggle::CapReached => Err(AppError::BadRequest(format!(
                "At most {} episodes can be marked as top",
                MAX_TOP_EPISODES
            ))),
        }
    }

    pub async fn update(&self, params: UpdateEpisodeParams) -> Result<Option<Episode>, AppError> {
        if let Some(chapter_id) = params.chapter_id {
            self.ensure_chapter(chapter_id).await?;
        }

        Ok(EpisodeRepository::new(self.db).update(params).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(EpisodeRepository::new(self.db).delete(id).await?)
    }

    async fn ensure_chapter(&self, chapter_id: i32) -> Result<(), AppError> {
        if !ChapterRepository::new(self.db).exists(chapter_id).await? {
            return Err(AppError::NotFound(format!(
                "Chapter {} not found",
                chapter_id
            )));
        }

        Ok(())
    }
}
