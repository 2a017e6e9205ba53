use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};
use tracing::info;

use employee_core::config::PostgresConfig;

/// One-time schema setup, idempotent. Must complete before the pool
/// accepts request traffic.
const CREATE_EMPLOYEES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS employees (
        employee_id     INTEGER PRIMARY KEY,
        name            TEXT    NOT NULL,
        email           TEXT    NOT NULL UNIQUE,
        department      TEXT    NOT NULL,
        designation     TEXT    NOT NULL,
        salary          INTEGER NOT NULL,
        date_of_joining DATE    NOT NULL
    )";

/// Create the PostgreSQL connection pool, creating the database and table
/// first when absent. A fresh server with neither is fully usable after
/// this returns.
pub async fn init_pg_pool(config: &PostgresConfig) -> anyhow::Result<PgPool> {
    ensure_database(config).await?;

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await?;
    info!("PostgreSQL connected: {}:{}", config.host, config.port);

    sqlx::query(CREATE_EMPLOYEES_TABLE).execute(&pool).await?;
    info!("Database setup complete");

    Ok(pool)
}

/// Create the target database when missing. Postgres has no `CREATE
/// DATABASE IF NOT EXISTS`, so existence is checked through `pg_database`
/// on a short-lived maintenance connection.
async fn ensure_database(config: &PostgresConfig) -> anyhow::Result<()> {
    let mut conn = PgConnection::connect(&config.connection_string_for("postgres")).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&config.database)
            .fetch_one(&mut conn)
            .await?;

    if !exists {
        sqlx::query(&create_database_statement(&config.database))
            .execute(&mut conn)
            .await?;
        info!("Created database {}", config.database);
    }

    conn.close().await?;
    Ok(())
}

/// `CREATE DATABASE` takes an identifier, not a bind parameter, so the
/// name is quoted by hand.
fn create_database_statement(database: &str) -> String {
    format!("CREATE DATABASE \"{}\"", database.replace('"', "\"\""))
}

// ── Tests ────────────────────────────────────────────────────────────
