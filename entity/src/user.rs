use sea_orm::entity::prelude::*;

use crate::search;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub name_search: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub role: String,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub refresh_token: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_favorite_episode::Entity")]
    UserFavoriteEpisode,
    #[sea_orm(has_many = "super::google_play_transaction::Entity")]
    GooglePlayTransaction,
}

impl Related<super::user_favorite_episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFavoriteEpisode.def()
    }
}

impl Related<super::google_play_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GooglePlayTransaction.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        search::refresh(&self.name, &mut self.name_search);

        Ok(self)
    }
}
