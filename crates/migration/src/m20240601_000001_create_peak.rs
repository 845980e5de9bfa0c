//! Create `peak` table.
//! One row per summit; `id` is an AUTOINCREMENT key so deleted ids are never handed out again.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Peak::Table)
                    .if_not_exists()
                    .col(pk_auto(Peak::Id))
                    .col(string(Peak::Name).not_null())
                    .col(double(Peak::Latitude).not_null())
                    .col(double(Peak::Longitude).not_null())
                    .col(integer(Peak::Altitude).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Peak::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Peak {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
    Altitude,
}
