//! Registry module: domain, repository and service layers.
//!
//! Handlers only talk to [`RegistryService`]; storage is whatever
//! [`repository::RegistryRepository`] the service was built with.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::RegistryService;
