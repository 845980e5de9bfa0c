use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookups by name
        manager
            .create_index(
                Index::create()
                    .name("idx_peak_name")
                    .table(Peak::Table)
                    .col(Peak::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Bounding-box filters hit both coordinate columns
        manager
            .create_index(
                Index::create()
                    .name("idx_peak_latitude")
                    .table(Peak::Table)
                    .col(Peak::Latitude)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_peak_longitude")
                    .table(Peak::Table)
                    .col(Peak::Longitude)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_peak_name").table(Peak::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_peak_latitude").table(Peak::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_peak_longitude").table(Peak::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Peak { Table, Name, Latitude, Longitude }
