use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::registry::repo::seaorm::SeaOrmRegistryRepository;
use service::registry::repository::RegistryRepository;
use service::RegistryService;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, create the schema if absent, apply the configured seed and build
/// handler state.
pub async fn bootstrap(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    common::env::ensure_database_dir(&cfg.database.url).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("schema ready");

    let repo: Arc<dyn RegistryRepository> = Arc::new(SeaOrmRegistryRepository::new(db));
    if let Some(seed) = &cfg.seed {
        service::seed::apply(repo.as_ref(), seed).await?;
    }

    Ok(ServerState::new(RegistryService::new(repo)))
}

/// Serve the registry on `cfg.server` until `shutdown` resolves, then drain
/// in-flight requests.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = bootstrap(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "starting server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server drained");
    Ok(())
}
