use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/registry.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Rows inserted at startup for tables no HTTP route writes to.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SeedConfig {
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub client_users: Vec<SeedClientUser>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeedUser {
    pub username: String,
    /// Company name; must be listed in `companies` or already stored.
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeedClientUser {
    pub client_id: i32,
    pub user_id: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool { true }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    /// `CONFIG_PATH` (default `config.toml`), see [`AppConfig::load_or_env_from`].
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// The file at `path` if it exists, otherwise defaults with `SERVER_HOST`,
    /// `SERVER_PORT`, `TOKIO_WORKER_THREADS` and `DATABASE_URL` overrides.
    /// A file that exists but does not parse is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("failed to load {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|w| w.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Fill an empty URL from `DATABASE_URL`, then from the SQLite default.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("sqlite:") || lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with sqlite:, postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_dev_port() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:5000");
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn parses_full_file() -> Result<()> {
        let cfg = parse(r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [seed]
            companies = ["Acme"]
            users = [{ username = "alice", company = "Acme" }, { username = "bob" }]
            client_users = [{ client_id = 1, user_id = 1 }]
        "#)?;
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.max_connections, 1);
        assert_eq!(cfg.database.min_connections, 1);
        let seed = cfg.seed.expect("seed table");
        assert_eq!(seed.companies, vec!["Acme".to_string()]);
        assert_eq!(seed.users[0].company.as_deref(), Some("Acme"));
        assert_eq!(seed.users[1].company, None);
        assert!(seed.client_users[0].active);
        Ok(())
    }

    fn temp_config(name: &str, content: &str) -> std::io::Result<std::path::PathBuf> {
        let path = std::env::temp_dir().join(format!("configs-{}-{}.toml", std::process::id(), name));
        std::fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let path = temp_config("malformed", "[server]\nport = \"not a port\"\n\n[seed]\ncompanies = [\"Acme\"]\n")?;
        let res = AppConfig::load_or_env_from(&path.to_string_lossy());
        std::fs::remove_file(&path)?;
        let err = res.expect_err("malformed config must not fall back to env");
        assert!(err.to_string().contains("failed to load"));
        Ok(())
    }

    #[test]
    fn missing_file_falls_back_to_env() -> Result<()> {
        let path = std::env::temp_dir().join(format!("configs-{}-absent.toml", std::process::id()));
        let cfg = AppConfig::load_or_env_from(&path.to_string_lossy())?;
        assert!(cfg.seed.is_none());
        assert!(!cfg.database.url.is_empty());
        Ok(())
    }

    #[test]
    fn present_file_is_loaded() -> Result<()> {
        let path = temp_config("present", "[server]\nhost = \"127.0.0.1\"\nport = 8081\n\n[database]\nurl = \"sqlite::memory:\"\n\n[seed]\ncompanies = [\"Acme\"]\n")?;
        let res = AppConfig::load_or_env_from(&path.to_string_lossy());
        std::fs::remove_file(&path)?;
        let cfg = res?;
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.seed.map(|s| s.companies), Some(vec!["Acme".to_string()]));
        Ok(())
    }

    #[test]
    fn validate_rejects_unknown_scheme() {
        let db = DatabaseConfig { url: "mysql://localhost/db".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_pool_bounds() {
        let db = DatabaseConfig { url: "sqlite::memory:".into(), min_connections: 5, max_connections: 2, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn zero_workers_normalized() -> Result<()> {
        let mut server = ServerConfig { worker_threads: Some(0), ..Default::default() };
        server.normalize()?;
        assert_eq!(server.worker_threads, Some(4));
        Ok(())
    }
}
