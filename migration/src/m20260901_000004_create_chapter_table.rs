use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000003_create_book_table::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chapter::Table)
                    .if_not_exists()
                    .col(pk_auto(Chapter::Id))
                    .col(string(Chapter::Name))
                    .col(string(Chapter::NameSearch))
                    .col(text_null(Chapter::Description))
                    .col(text_null(Chapter::DescriptionSearch))
                    .col(string_null(Chapter::Url))
                    .col(boolean(Chapter::IsPremium).default(true))
                    .col(integer(Chapter::BookId))
                    .col(
                        timestamp_with_time_zone(Chapter::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Chapter::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chapter_book_id")
                            .from(Chapter::Table, Chapter::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chapter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Chapter {
    Table,
    Id,
    Name,
    NameSearch,
    Description,
    DescriptionSearch,
    Url,
    IsPremium,
    BookId,
    CreatedAt,
    UpdatedAt,
}
