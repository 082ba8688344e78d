//! Migration to create the reservations table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservations::Id))
                    .col(string_len(Reservations::CustomerName, 100).not_null())
                    .col(string_len(Reservations::Phone, 20).not_null())
                    .col(integer(Reservations::PartySize).not_null())
                    .col(timestamp_with_time_zone(Reservations::ReservedAt).not_null())
                    .col(string_len(Reservations::Status, 16).not_null())
                    .col(
                        timestamp_with_time_zone(Reservations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Reservations::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always ordered by reservation time
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_reserved_at")
                    .table(Reservations::Table)
                    .col(Reservations::ReservedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    CustomerName,
    Phone,
    PartySize,
    ReservedAt,
    Status,
    CreatedAt,
    UpdatedAt,
}
