//! Create `usuario` table.
//!
//! Stores marketplace users; providers are plain users referenced by
//! offerings. Email and document carry unique keys.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuario::Table)
                    .if_not_exists()
                    .col(big_integer(Usuario::Id).auto_increment().primary_key())
                    .col(string_len(Usuario::Name, 128).not_null())
                    .col(string_len(Usuario::Email, 255).unique_key().not_null())
                    .col(string_len(Usuario::Document, 32).unique_key().not_null())
                    .col(string_len(Usuario::PasswordHash, 255).not_null())
                    .col(string_len(Usuario::Phone, 32).not_null())
                    // Explicitly nullable: users may have no profile image
                    .col(
                        ColumnDef::new(Usuario::ProfileImage)
                            .string_len(255)
                            .null(),
                    )
                    .col(integer(Usuario::NumStrikes).not_null().default(0))
                    .col(timestamp_with_time_zone(Usuario::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Usuario::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Usuario::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Usuario {
    Table,
    Id,
    Name,
    Email,
    Document,
    PasswordHash,
    Phone,
    ProfileImage,
    NumStrikes,
    CreatedAt,
    UpdatedAt,
}
