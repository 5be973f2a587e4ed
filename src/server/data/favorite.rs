use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::server::model::episode::Episode;

use entity::user_favorite_episode::Column;

/// Repository for the user ↔ favorite episode relationship.
pub struct FavoriteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks an episode as a favorite. Marking an existing favorite again is a no-op.
    pub async fn add(&self, user_id: i32, episode_id: i32) -> Result<(), DbErr> {
        entity::prelude::UserFavoriteEpisode::insert(entity::user_favorite_episode::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            episode_id: ActiveValue::Set(episode_id),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::EpisodeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Removes a favorite.
    ///
    /// # Returns
    /// - `Ok(true)` - The favorite existed and was removed
    /// - `Ok(false)` - The episode was not a favorite
    pub async fn remove(&self, user_id: i32, episode_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::UserFavoriteEpisode::delete_by_id((user_id, episode_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn is_favorite(&self, user_id: i32, episode_id: i32) -> Result<bool, DbErr> {
        Ok(
            entity::prelude::UserFavoriteEpisode::find_by_id((user_id, episode_id))
                .one(self.db)
                .await?
                .is_some(),
        )
    }

    /// Gets the ids of every episode the user favorited, oldest favorite first.
    pub async fn get_episode_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let favorites = entity::prelude::UserFavoriteEpisode::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::EpisodeId)
            .all(self.db)
            .await?;

        Ok(favorites.into_iter().map(|f| f.episode_id).collect())
    }

    /// Returns which of `episode_ids` the user favorited.
    pub async fn get_favorited_among(
        &self,
        user_id: i32,
        episode_ids: &[i32],
    ) -> Result<HashSet<i32>, DbErr> {
        if episode_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let favorites = entity::prelude::UserFavoriteEpisode::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::EpisodeId.is_in(episode_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(favorites.into_iter().map(|f| f.episode_id).collect())
    }

    /// Gets the user's favorite episodes, most recently favorited first.
    pub async fn get_episodes(&self, user_id: i32) -> Result<Vec<Episode>, DbErr> {
        let entities = entity::prelude::Episode::find()
            .join(
                JoinType::InnerJoin,
                entity::episode::Relation::UserFavoriteEpisode.def(),
            )
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(entity::episode::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Episode::from_entity).collect())
    }
}
