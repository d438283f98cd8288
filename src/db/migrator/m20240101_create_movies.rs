use sea_orm_migration::prelude::*;

use crate::models::movie::GENRE_MAX_LEN;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::cast_possible_truncation)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(
                        ColumnDef::new(Movies::Genre)
                            .string_len(GENRE_MAX_LEN as u32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Movies::Duration).integer().not_null())
                    .col(ColumnDef::new(Movies::ReleaseDate).date().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movies {
    Table,
    Id,
    Title,
    Genre,
    Duration,
    ReleaseDate,
}
