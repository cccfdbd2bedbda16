//! Table and column identifiers for the whole schema.
//!
//! Migrations, foreign keys and indexes name tables only through these enums;
//! entity `table_name`s in the `models` crate are checked against them in tests.
use sea_orm_migration::prelude::*;

#[derive(DeriveIden, Clone, Copy)]
pub enum Companies { Table, Id, Name }

#[derive(DeriveIden, Clone, Copy)]
pub enum Users { Table, Id, Username, CompanyId }

#[derive(DeriveIden, Clone, Copy)]
pub enum Clients { Table, Id, Name, Email, Phone, UserId, CompanyId }

#[derive(DeriveIden, Clone, Copy)]
pub enum ClientUsers { Table, Id, ClientId, UserId, CreatedAt, UpdatedAt, DeletedAt, Active }

/// Column length limits shared with entity validation.
pub mod limits {
    pub const USERNAME: u32 = 50;
    pub const COMPANY_NAME: u32 = 100;
    pub const CLIENT_NAME: u32 = 100;
    pub const CLIENT_EMAIL: u32 = 100;
    pub const CLIENT_PHONE: u32 = 20;
}
