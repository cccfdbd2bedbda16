//! SeaORM entities for the registry schema plus thin per-entity helpers.
pub mod errors;
pub mod db;
pub mod company;
pub mod user;
pub mod client;
pub mod client_user;

#[cfg(test)]
mod tests;
