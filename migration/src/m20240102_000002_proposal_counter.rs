use sea_orm_migration::prelude::*;

// The single row is inserted lazily by the first promotion.
#[derive(DeriveIden)]
enum ProposalCounter {
    Table,
    Id,
    LastAssigned,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProposalCounter::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProposalCounter::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProposalCounter::LastAssigned)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProposalCounter::Table).to_owned())
            .await
    }
}
