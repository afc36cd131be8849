//! API server entry point

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use infra_db::{create_pool, DatabaseConfig};
use interface_api::{build_state, config::ApiConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("failed to create database pool")?;
    infra_db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let addr = config.server_addr();
    let app = create_router(build_state(pool, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "cashbook api listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
