use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Name))
                    .col(string(User::NameSearch))
                    .col(string_uniq(User::Email))
                    .col(string(User::Password))
                    .col(string(User::Role).default("user"))
                    .col(date_null(User::DateOfBirth))
                    .col(string_null(User::Gender))
                    .col(string_null(User::Address))
                    .col(string_null(User::PhoneNumber))
                    .col(text_null(User::RefreshToken))
                    .col(string_null(User::ResetToken))
                    .col(timestamp_with_time_zone_null(User::ResetTokenExpiresAt))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Name,
    NameSearch,
    Email,
    Password,
    Role,
    DateOfBirth,
    Gender,
    Address,
    PhoneNumber,
    RefreshToken,
    ResetToken,
    ResetTokenExpiresAt,
    CreatedAt,
}
