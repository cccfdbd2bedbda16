use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::registry::repo::seaorm::SeaOrmRegistryRepository;
use service::registry::repository::RegistryRepository;
use service::RegistryService;

/// Shared handler state. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub registry: RegistryService,
}

impl ServerState {
    pub fn new(registry: RegistryService) -> Self {
        Self { registry }
    }

    pub fn with_repository(repo: Arc<dyn RegistryRepository>) -> Self {
        Self::new(RegistryService::new(repo))
    }

    /// State backed by SeaORM on `db`.
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::with_repository(Arc::new(SeaOrmRegistryRepository::new(db)))
    }
}
