//! Create `servico` table with FK to `usuario`.
//!
//! An offering always belongs to a provider; deleting the provider
//! cascades to the offerings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Servico::Table)
                    .if_not_exists()
                    .col(big_integer(Servico::Id).auto_increment().primary_key())
                    .col(big_integer(Servico::ProviderId).not_null())
                    .col(string_len(Servico::Name, 128).not_null())
                    .col(string_len(Servico::Description, 1024).not_null())
                    .col(double(Servico::Price).not_null())
                    .col(timestamp_with_time_zone(Servico::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Servico::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_servico_provider")
                            .from(Servico::Table, Servico::ProviderId)
                            .to(Usuario::Table, Usuario::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Servico::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Servico {
    Table,
    Id,
    ProviderId,
    Name,
    Description,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Usuario {
    Table,
    Id,
}
