use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Work {
    Table,
    Id,
    Name,
    CustomerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Proposal {
    Table,
    Id,
    SequenceNumber,
    RevisionNumber,
    OptionNumber,
    Priority,
    Category,
    Description,
    Notes,
    Status,
    PriceCents,
    WorkId,
    PersonId,
    EmployeeId,
    SellerId,
    CreatedAt,
    UpdatedAt,
    PromotedAt,
    ConcludedAt,
}

#[derive(DeriveIden)]
enum Contract {
    Table,
    Id,
    ProposalId,
    ContractorId,
    IsCancelled,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Work::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Work::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Work::CustomerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Work::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Proposal::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Proposal::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Proposal::SequenceNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Proposal::RevisionNumber)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Proposal::OptionNumber).integer())
                    .col(
                        ColumnDef::new(Proposal::Priority)
                            .string_len(8)
                            .not_null()
                            .default("NORMAL"),
                    )
                    .col(
                        ColumnDef::new(Proposal::Category)
                            .string_len(8)
                            .not_null()
                            .default("QUOTE"),
                    )
                    .col(
                        ColumnDef::new(Proposal::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Proposal::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Proposal::Status)
                            .string_len(4)
                            .not_null()
                            .default("n"),
                    )
                    .col(
                        ColumnDef::new(Proposal::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Proposal::WorkId).uuid().not_null())
                    .col(ColumnDef::new(Proposal::PersonId).uuid())
                    .col(ColumnDef::new(Proposal::EmployeeId).uuid())
                    .col(ColumnDef::new(Proposal::SellerId).uuid())
                    .col(
                        ColumnDef::new(Proposal::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Proposal::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Proposal::PromotedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Proposal::ConcludedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_proposal_work")
                            .from(Proposal::Table, Proposal::WorkId)
                            .to(Work::Table, Work::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_proposal_sequence")
                    .table(Proposal::Table)
                    .col(Proposal::SequenceNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_proposal_work")
                    .table(Proposal::Table)
                    .col(Proposal::WorkId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contract::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contract::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Contract::ProposalId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Contract::ContractorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Contract::IsCancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Contract::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contract_proposal")
                            .from(Contract::Table, Contract::ProposalId)
                            .to(Proposal::Table, Proposal::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contract::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Proposal::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Work::Table).if_exists().to_owned())
            .await
    }
}
