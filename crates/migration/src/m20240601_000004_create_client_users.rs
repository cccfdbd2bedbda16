//! Create `client_users` association table.
//!
//! Carries a soft-delete timestamp and an `active` flag; no uniqueness on the pair.
use sea_orm_migration::{prelude::*, schema::*};

use crate::schema::{ClientUsers, Clients, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientUsers::Table)
                    .if_not_exists()
                    .col(pk_auto(ClientUsers::Id))
                    .col(integer(ClientUsers::ClientId).not_null())
                    .col(integer(ClientUsers::UserId).not_null())
                    .col(timestamp_with_time_zone(ClientUsers::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ClientUsers::UpdatedAt).not_null())
                    // Explicitly define nullable deleted_at to avoid conflicting NULL/NOT NULL
                    .col(
                        ColumnDef::new(ClientUsers::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(boolean(ClientUsers::Active).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_users_client")
                            .from(ClientUsers::Table, ClientUsers::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_users_user")
                            .from(ClientUsers::Table, ClientUsers::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ClientUsers::Table).to_owned()).await
    }
}
