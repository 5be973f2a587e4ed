use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000002_create_category_table::Category;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(pk_auto(Book::Id))
                    .col(string(Book::Name))
                    .col(string(Book::NameSearch))
                    .col(string(Book::Author))
                    .col(string(Book::AuthorSearch))
                    .col(text_null(Book::Description))
                    .col(text_null(Book::DescriptionSearch))
                    .col(string_null(Book::Url))
                    .col(boolean(Book::IsPremium).default(true))
                    .col(boolean(Book::IsTop10Year).default(false))
                    .col(integer(Book::CategoryId))
                    .col(
                        timestamp_with_time_zone(Book::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Book::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_category_id")
                            .from(Book::Table, Book::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Book::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Book {
    Table,
    Id,
    Name,
    NameSearch,
    Author,
    AuthorSearch,
    Description,
    DescriptionSearch,
    Url,
    IsPremium,
    #[sea_orm(iden = "is_top10_year")]
    IsTop10Year,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}
