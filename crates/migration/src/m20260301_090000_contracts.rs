use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Contracts {
    Table,
    Id,
    FileId,
    Name,
    Amount,
    NextPaymentDate,
    Frequency,
    Status,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::FileId).string().not_null())
                    .col(ColumnDef::new(Contracts::Name).string().not_null())
                    .col(ColumnDef::new(Contracts::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Contracts::NextPaymentDate).string().null())
                    .col(ColumnDef::new(Contracts::Frequency).string().null())
                    .col(
                        ColumnDef::new(Contracts::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-contracts-file_id-status")
                    .table(Contracts::Table)
                    .col(Contracts::FileId)
                    .col(Contracts::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
