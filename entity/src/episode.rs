use sea_orm::entity::prelude::*;

use crate::search;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "episode")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub title_search: String,
    pub album: String,
    pub album_search: String,
    pub artist: String,
    pub artist_search: String,
    pub artwork: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub description_search: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub is_premium: bool,
    pub is_top: bool,
    pub chapter_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chapter::Entity",
        from = "Column::ChapterId",
        to = "super::chapter::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Chapter,
    #[sea_orm(has_many = "super::user_favorite_episode::Entity")]
    UserFavoriteEpisode,
}

impl Related<super::chapter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapter.def()
    }
}

impl Related<super::user_favorite_episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFavoriteEpisode.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        search::refresh(&self.title, &mut self.title_search);
        search::refresh(&self.album, &mut self.album_search);
        search::refresh(&self.artist, &mut self.artist_search);
        search::refresh_optional(&self.description, &mut self.description_search);

        Ok(self)
    }
}
