//! Database primitives shared by the server binary and the test harness.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("invalid {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error(transparent)]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven pool settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_url_key")]
    env_key: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(default)]
    sql_logging: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(default_url_key())
    }
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            max_connections: default_max_connections(),
            sql_logging: false,
        }
    }

    /// Reads `DATABASE_MAX_CONNECTIONS` and `DATABASE_SQL_LOGGING` on top of
    /// the defaults.
    pub fn from_env() -> DbResult<Self> {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            settings.max_connections = raw.trim().parse().map_err(|_| DbError::InvalidSetting {
                key: "DATABASE_MAX_CONNECTIONS",
                value: raw.clone(),
            })?;
        }
        settings.sql_logging = std::env::var("DATABASE_SQL_LOGGING")
            .ok()
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(settings)
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

/// Open a pool against the URL named by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    connect_url(&url, settings).await
}

pub async fn connect_url(url: &str, settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(settings.sql_logging);
    let pool = Database::connect(options).await?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Cheap liveness probe used by the health endpoint.
pub async fn ping(pool: &DbPool) -> bool {
    let backend = pool.get_database_backend();
    pool.execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_names_the_variable() {
        let settings = DatabaseSettings::new("QUOTING_TEST_URL_THAT_IS_NOT_SET");
        let err = settings.database_url().unwrap_err();
        assert_eq!(
            err.to_string(),
            "database url missing (set QUOTING_TEST_URL_THAT_IS_NOT_SET)"
        );
    }

    #[test]
    fn max_connections_can_be_overridden() {
        let settings = DatabaseSettings::default().with_max_connections(1);
        assert_eq!(settings.max_connections(), 1);
    }

    #[tokio::test]
    async fn ping_reports_live_sqlite_pool() {
        let pool = connect_url("sqlite::memory:", &DatabaseSettings::default())
            .await
            .unwrap();
        assert!(ping(&pool).await);
    }
}
