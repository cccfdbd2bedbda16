use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::ServerState;

pub struct TestApp {
    pub base_url: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn spawn(state: ServerState) -> anyhow::Result<TestApp> {
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// Migrated in-memory database with company `Acme` (id 1) and users
/// `alice` (id 1, Acme) and `bob` (id 2, no company).
pub async fn seeded_db() -> anyhow::Result<DatabaseConnection> {
    let db = models::db::connect_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let acme = models::company::create(&db, "Acme").await?;
    models::user::create(&db, "alice", Some(acme.id)).await?;
    models::user::create(&db, "bob", None).await?;
    Ok(db)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}
