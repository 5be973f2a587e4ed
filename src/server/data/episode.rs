use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, TransactionTrait,
};

use crate::server::{
    collection::{self, filter, Collection, ParsedQuery},
    data::TopToggle,
    model::episode::{CreateEpisodeParams, Episode, EpisodeSearchParams, UpdateEpisodeParams},
};

use entity::{episode::Column, search};

/// Which neighbour of an episode to look up within its chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbour {
    Next,
    Previous,
}

pub struct EpisodeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EpisodeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateEpisodeParams) -> Result<Episode, DbErr> {
        let entity = entity::episode::ActiveModel {
            title: ActiveValue::Set(params.title),
            album: ActiveValue::Set(params.album),
            artist: ActiveValue::Set(params.artist),
            artwork: ActiveValue::Set(params.artwork),
            url: ActiveValue::Set(params.url),
            description: ActiveValue::Set(params.description),
            content: ActiveValue::Set(params.content),
            is_premium: ActiveValue::Set(params.is_premium),
            is_top: ActiveValue::Set(false),
            chapter_id: ActiveValue::Set(params.chapter_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Episode::from_entity(entity))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Episode>, DbErr> {
        let entity = entity::prelude::Episode::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Episode::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Episode::find_by_id(id)
            .one(self.db)
            .await?
            .is_some())
    }

    pub async fn get_collection(
        &self,
        query: ParsedQuery<Column>,
    ) -> Result<Collection<Episode>, DbErr> {
        let collection =
            collection::collect(self.db, entity::prelude::Episode::find(), query).await?;

        Ok(collection.map(Episode::from_entity))
    }

    /// Gets a chapter's episodes, newest first.
    pub async fn get_by_chapter(&self, chapter_id: i32) -> Result<Vec<Episode>, DbErr> {
        let entities = entity::prelude::Episode::find()
            .filter(Column::ChapterId.eq(chapter_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Episode::from_entity).collect())
    }

    /// Gets the episode flagged as top, newest first.
    pub async fn get_top(&self) -> Result<Vec<Episode>, DbErr> {
        let entities = entity::prelude::Episode::find()
            .filter(Column::IsTop.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Episode::from_entity).collect())
    }

    /// Finds the adjacent episode in the same chapter by insertion order.
    ///
    /// # Returns
    /// - `Ok(Some(Episode))` - The neighbouring episode
    /// - `Ok(None)` - `episode` is the first or last of its chapter
    pub async fn get_neighbour(
        &self,
        episode: &Episode,
        neighbour: Neighbour,
    ) -> Result<Option<Episode>, DbErr> {
        let select = entity::prelude::Episode::find().filter(Column::ChapterId.eq(episode.chapter_id));

        let select = match neighbour {
            Neighbour::Next => select
                .filter(Column::Id.gt(episode.id))
                .order_by_asc(Column::Id),
            Neighbour::Previous => select
                .filter(Column::Id.lt(episode.id))
                .order_by_desc(Column::Id),
        };

        Ok(select.one(self.db).await?.map(Episode::from_entity))
    }

    /// Searches episodes, newest first.
    ///
    /// Text criteria are case-insensitive substring matches. Hierarchy criteria
    /// (`category_id`, `book_id`, `chapter_id`) are combined with OR so the result covers every
    /// chapter reachable from any of them; everything else is combined with AND.
    pub async fn search(&self, params: EpisodeSearchParams) -> Result<Collection<Episode>, DbErr> {
        let mut condition = Condition::all();

        for (column, value) in [
            (Column::TitleSearch, &params.title),
            (Column::AlbumSearch, &params.album),
            (Column::ArtistSearch, &params.artist),
            (Column::DescriptionSearch, &params.description),
        ] {
            if let Some(value) = value {
                let needle = search::fold(value.trim());
                condition = condition.add(column.like(filter::contains_pattern(&needle)));
            }
        }
        if let Some(is_premium) = params.is_premium {
            condition = condition.add(Column::IsPremium.eq(is_premium));
        }
        if let Some(is_top) = params.is_top {
            condition = condition.add(Column::IsTop.eq(is_top));
        }

        if params.has_hierarchy_filter() {
            let mut hierarchy = Condition::any();

            if let Some(chapter_id) = params.chapter_id {
                hierarchy = hierarchy.add(Column::ChapterId.eq(chapter_id));
            }
            if let Some(book_id) = params.book_id {
                hierarchy = hierarchy.add(Column::ChapterId.in_subquery(
                    entity::prelude::Chapter::find()
                        .select_only()
                        .column(entity::chapter::Column::Id)
                        .filter(entity::chapter::Column::BookId.eq(book_id))
                        .into_query(),
                ));
            }
            if let Some(category_id) = params.category_id {
                let books = entity::prelude::Book::find()
                    .select_only()
                    .column(entity::book::Column::Id)
                    .filter(entity::book::Column::CategoryId.eq(category_id))
                    .into_query();

                hierarchy = hierarchy.add(Column::ChapterId.in_subquery(
                    entity::prelude::Chapter::find()
                        .select_only()
                        .column(entity::chapter::Column::Id)
                        .filter(entity::chapter::Column::BookId.in_subquery(books))
                        .into_query(),
                ));
            }

            condition = condition.add(hierarchy);
        }

        let select = entity::prelude::Episode::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let collection = collection::paginate(self.db, select, params.page, params.limit).await?;

        Ok(collection.map(Episode::from_entity))
    }

    /// Flips the top flag in one transaction, rolling back a mark that would flag more than
    /// `max` episodes.
    pub async fn toggle_top(&self, id: i32, max: u64) -> Result<TopToggle<Episode>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::Episode::find_by_id(id).one(&txn).await? else {
            return Ok(TopToggle::Missing);
        };

        let marking = !existing.is_top;
        let mut active = existing.into_active_model();
        active.is_top = ActiveValue::Set(marking);
        let updated = active.update(&txn).await?;

        if marking && count_top(&txn).await? > max {
            txn.rollback().await?;
            return Ok(TopToggle::CapReached);
        }

        txn.commit().await?;

        Ok(TopToggle::Toggled(Episode::from_entity(updated)))
    }

    /// Stores a transcript in the episode's `content`.
    pub async fn set_content(&self, id: i32, content: String) -> Result<Option<Episode>, DbErr> {
        let Some(existing) = entity::prelude::Episode::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.content = ActiveValue::Set(Some(content));

        Ok(Some(Episode::from_entity(active.update(self.db).await?)))
    }

    pub async fn update(&self, params: UpdateEpisodeParams) -> Result<Option<Episode>, DbErr> {
        let Some(existing) = entity::prelude::Episode::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = existing.clone().into_active_model();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(album) = params.album {
            active.album = ActiveValue::Set(album);
        }
        if let Some(artist) = params.artist {
            active.artist = ActiveValue::Set(artist);
        }
        if let Some(artwork) = params.artwork {
            active.artwork = ActiveValue::Set(Some(artwork));
        }
        if let Some(url) = params.url {
            active.url = ActiveValue::Set(Some(url));
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(content) = params.content {
            active.content = ActiveValue::Set(Some(content));
        }
        if let Some(is_premium) = params.is_premium {
            active.is_premium = ActiveValue::Set(is_premium);
        }
        if let Some(chapter_id) = params.chapter_id {
            active.chapter_id = ActiveValue::Set(chapter_id);
        }

        if !active.is_changed() {
            return Ok(Some(Episode::from_entity(existing)));
        }

        Ok(Some(Episode::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Episode::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

async fn count_top<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    entity::prelude::Episode::find()
        .filter(Column::IsTop.eq(true))
        .count(db)
        .await
}
