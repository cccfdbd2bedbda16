use sea_orm_migration::prelude::*;

use crate::schema::{ClientUsers, Clients};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Clients: lookups by owner and by company
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_user")
                    .table(Clients::Table)
                    .col(Clients::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_company")
                    .table(Clients::Table)
                    .col(Clients::CompanyId)
                    .to_owned(),
            )
            .await?;

        // ClientUsers: both sides of the association
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_client_users_client")
                    .table(ClientUsers::Table)
                    .col(ClientUsers::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_client_users_user")
                    .table(ClientUsers::Table)
                    .col(ClientUsers::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clients_user").table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_clients_company").table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_client_users_client").table(ClientUsers::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_client_users_user").table(ClientUsers::Table).to_owned())
            .await
    }
}
