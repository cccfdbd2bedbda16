//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

pub mod schema;

mod m20240601_000001_create_companies;
mod m20240601_000002_create_users;
mod m20240601_000003_create_clients;
mod m20240601_000004_create_client_users;
mod m20240601_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_companies::Migration),
            Box::new(m20240601_000002_create_users::Migration),
            Box::new(m20240601_000003_create_clients::Migration),
            Box::new(m20240601_000004_create_client_users::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000010_add_indexes::Migration),
        ]
    }
}
