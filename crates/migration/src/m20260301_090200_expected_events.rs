use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum ExpectedEvents {
    Table,
    Id,
    FileId,
    ExpectedAmount,
    ExpectedDate,
    SourceType,
    SourceId,
    Status,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExpectedEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpectedEvents::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExpectedEvents::FileId).string().not_null())
                    .col(
                        ColumnDef::new(ExpectedEvents::ExpectedAmount)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExpectedEvents::ExpectedDate)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExpectedEvents::SourceType).string().not_null())
                    .col(ColumnDef::new(ExpectedEvents::SourceId).string().null())
                    .col(
                        ColumnDef::new(ExpectedEvents::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expected_events-file_id-status")
                    .table(ExpectedEvents::Table)
                    .col(ExpectedEvents::FileId)
                    .col(ExpectedEvents::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExpectedEvents::Table).to_owned())
            .await
    }
}
