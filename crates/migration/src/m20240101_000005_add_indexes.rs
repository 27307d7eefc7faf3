use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Servico: index on provider_id for the by-provider listing
        manager
            .create_index(
                Index::create()
                    .name("idx_servico_provider")
                    .table(Servico::Table)
                    .col(Servico::ProviderId)
                    .to_owned(),
            )
            .await?;

        // ServicoTag: index on tag_id (primary key already covers servico_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_servico_tag_tag")
                    .table(ServicoTag::Table)
                    .col(ServicoTag::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_servico_provider")
                    .table(Servico::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_servico_tag_tag")
                    .table(ServicoTag::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Servico {
    Table,
    ProviderId,
}

#[derive(DeriveIden)]
enum ServicoTag {
    Table,
    TagId,
}
