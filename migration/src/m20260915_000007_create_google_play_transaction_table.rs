use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GooglePlayTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(GooglePlayTransaction::Id))
                    .col(integer(GooglePlayTransaction::UserId))
                    .col(string(GooglePlayTransaction::PackageName))
                    .col(string(GooglePlayTransaction::ProductId))
                    .col(text(GooglePlayTransaction::PurchaseToken))
                    .col(string_null(GooglePlayTransaction::StartTimeMillis))
                    .col(string_null(GooglePlayTransaction::ExpiryTimeMillis))
                    .col(string_null(GooglePlayTransaction::AutoRenewing))
                    .col(string_null(GooglePlayTransaction::PriceCurrencyCode))
                    .col(string_null(GooglePlayTransaction::PriceAmountMicros))
                    .col(string_null(GooglePlayTransaction::CountryCode))
                    .col(string_null(GooglePlayTransaction::DeveloperPayload))
                    .col(string_null(GooglePlayTransaction::CancelReason))
                    .col(string_null(GooglePlayTransaction::UserCancellationTimeMillis))
                    .col(string_null(GooglePlayTransaction::OrderId))
                    .col(string_null(GooglePlayTransaction::PurchaseType))
                    .col(string_null(GooglePlayTransaction::AcknowledgementState))
                    .col(string_null(GooglePlayTransaction::Kind))
                    .col(boolean(GooglePlayTransaction::IsDeleted).default(false))
                    .col(
                        timestamp_with_time_zone(GooglePlayTransaction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_google_play_transaction_user_id")
                            .from(GooglePlayTransaction::Table, GooglePlayTransaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GooglePlayTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GooglePlayTransaction {
    Table,
    Id,
    UserId,
    PackageName,
    ProductId,
    PurchaseToken,
    StartTimeMillis,
    ExpiryTimeMillis,
    AutoRenewing,
    PriceCurrencyCode,
    PriceAmountMicros,
    CountryCode,
    DeveloperPayload,
    CancelReason,
    UserCancellationTimeMillis,
    OrderId,
    PurchaseType,
    AcknowledgementState,
    Kind,
    IsDeleted,
    CreatedAt,
}
