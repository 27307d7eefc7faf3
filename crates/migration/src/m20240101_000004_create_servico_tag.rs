//! Create `servico_tag` join table (offering <-> tag, many-to-many).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServicoTag::Table)
                    .if_not_exists()
                    .col(big_integer(ServicoTag::ServicoId).not_null())
                    .col(big_integer(ServicoTag::TagId).not_null())
                    .primary_key(
                        Index::create()
                            .col(ServicoTag::ServicoId)
                            .col(ServicoTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_servico_tag_servico")
                            .from(ServicoTag::Table, ServicoTag::ServicoId)
                            .to(Servico::Table, Servico::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_servico_tag_tag")
                            .from(ServicoTag::Table, ServicoTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServicoTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServicoTag {
    Table,
    ServicoId,
    TagId,
}

#[derive(DeriveIden)]
enum Servico {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tag {
    Table,
    Id,
}
