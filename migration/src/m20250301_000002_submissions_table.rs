use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to `links`: submissions must survive link deletion
        // as audit records. Referential integrity is checked at write time.
        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submission::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submission::Code).string().not_null())
                    .col(ColumnDef::new(Submission::FieldsJson).text().not_null())
                    .col(
                        ColumnDef::new(Submission::CapturedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the ownership-scoped listing: filter by code set, order by
        // capture time descending.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_code_captured_at")
                    .table(Submission::Table)
                    .col(Submission::Code)
                    .col(Submission::CapturedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_captured_at")
                    .table(Submission::Table)
                    .col(Submission::CapturedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_submissions_captured_at").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_submissions_code_captured_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submission {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    Code,
    FieldsJson,
    CapturedAt,
}
