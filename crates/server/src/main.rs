mod api;
mod db;
mod router;
mod state;
mod store;

use std::sync::Arc;

use tracing::info;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    employee_core::config::load_dotenv();
    let config = employee_core::Config::from_env();
    config.log_summary();

    // Schema setup completes before the listener binds.
    let pool = db::init_pg_pool(&config.postgres).await?;

    let state = Arc::new(AppState { pool });
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
