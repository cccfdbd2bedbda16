//! Create `clients` table; each client belongs to one user and one company.
use sea_orm_migration::{prelude::*, schema::*};

use crate::schema::{limits, Clients, Companies, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(pk_auto(Clients::Id))
                    .col(string_len(Clients::Name, limits::CLIENT_NAME).not_null())
                    .col(string_len(Clients::Email, limits::CLIENT_EMAIL).not_null())
                    .col(string_len(Clients::Phone, limits::CLIENT_PHONE).not_null())
                    .col(integer(Clients::UserId).not_null())
                    .col(integer(Clients::CompanyId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_user")
                            .from(Clients::Table, Clients::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_company")
                            .from(Clients::Table, Clients::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clients::Table).to_owned()).await
    }
}
