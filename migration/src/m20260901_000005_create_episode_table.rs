use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000004_create_chapter_table::Chapter;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Episode::Table)
                    .if_not_exists()
                    .col(pk_auto(Episode::Id))
                    .col(string(Episode::Title))
                    .col(string(Episode::TitleSearch))
                    .col(string(Episode::Album))
                    .col(string(Episode::AlbumSearch))
                    .col(string(Episode::Artist))
                    .col(string(Episode::ArtistSearch))
                    .col(string_null(Episode::Artwork))
                    .col(string_null(Episode::Url))
                    .col(text_null(Episode::Description))
                    .col(text_null(Episode::DescriptionSearch))
                    .col(text_null(Episode::Content))
                    .col(boolean(Episode::IsPremium).default(true))
                    .col(boolean(Episode::IsTop).default(false))
                    .col(integer(Episode::ChapterId))
                    .col(
                        timestamp_with_time_zone(Episode::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episode_chapter_id")
                            .from(Episode::Table, Episode::ChapterId)
                            .to(Chapter::Table, Chapter::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Episode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Episode {
    Table,
    Id,
    Title,
    TitleSearch,
    Album,
    AlbumSearch,
    Artist,
    ArtistSearch,
    Artwork,
    Url,
    Description,
    DescriptionSearch,
    Content,
    IsPremium,
    IsTop,
    ChapterId,
    CreatedAt,
}
