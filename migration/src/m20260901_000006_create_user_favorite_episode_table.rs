use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000001_create_user_table::User, m20260901_000005_create_episode_table::Episode,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserFavoriteEpisode::Table)
                    .if_not_exists()
                    .col(integer(UserFavoriteEpisode::UserId))
                    .col(integer(UserFavoriteEpisode::EpisodeId))
                    .col(
                        timestamp_with_time_zone(UserFavoriteEpisode::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserFavoriteEpisode::UserId)
                            .col(UserFavoriteEpisode::EpisodeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favorite_episode_user_id")
                            .from(UserFavoriteEpisode::Table, UserFavoriteEpisode::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favorite_episode_episode_id")
                            .from(UserFavoriteEpisode::Table, UserFavoriteEpisode::EpisodeId)
                            .to(Episode::Table, Episode::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFavoriteEpisode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserFavoriteEpisode {
    Table,
    UserId,
    EpisodeId,
    CreatedAt,
}
