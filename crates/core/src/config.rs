use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            postgres: PostgresConfig::from_env(),
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Server: {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "Postgres: {}:{}/{} (pool {}..{})",
            self.postgres.host,
            self.postgres.port,
            self.postgres.database,
            self.postgres.min_connections,
            self.postgres.max_connections
        );
    }
}

// ── HTTP server ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_u16("PORT", 8080),
        }
    }
}

// ── PostgreSQL ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl_mode: String,
    /// Warm connections kept open.
    pub min_connections: u32,
    /// Hard ceiling on concurrent acquisitions.
    pub max_connections: u32,
}

impl PostgresConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("PG_HOST", "localhost"),
            port: env_u16("PG_PORT", 5432),
            database: env_or("PG_DATABASE", "employee_mgmts"),
            username: env_opt("PG_USERNAME"),
            password: env_opt("PG_PASSWORD"),
            ssl_mode: env_or("PG_SSL_MODE", "prefer"),
            min_connections: env_u32("PG_MIN_CONNECTIONS", 1),
            max_connections: env_u32("PG_MAX_CONNECTIONS", 5),
        }
    }

    pub fn connection_string(&self) -> String {
        self.connection_string_for(&self.database)
    }

    /// Connection string for a specific database on the same server.
    /// One-time setup uses this to reach the `postgres` maintenance
    /// database before the target database exists.
    pub fn connection_string_for(&self, database: &str) -> String {
        let user = self.username.as_deref().unwrap_or("postgres");
        let pass = self.password.as_deref().unwrap_or("");
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            user, pass, self.host, self.port, database, self.ssl_mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string_defaults() {
        let pg = PostgresConfig {
            host: "localhost".into(),
            port: 5432,
            database: "employee_mgmts".into(),
            username: None,
            password: None,
            ssl_mode: "prefer".into(),
            min_connections: 1,
            max_connections: 5,
        };
        assert_eq!(
            pg.connection_string(),
            "postgres://postgres:@localhost:5432/employee_mgmts?sslmode=prefer"
        );
        assert_eq!(
            pg.connection_string_for("postgres"),
            "postgres://postgres:@localhost:5432/postgres?sslmode=prefer"
        );
    }
}
