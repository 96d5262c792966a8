use anyhow::Context;
use clap::Args;

use crate::app::app;
use crate::config;
use crate::database::DatabaseManager;
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    if crate::is_production!() && config.security.jwt_secret.is_empty() {
        anyhow::bail!("SECRET_KEY must be set in production");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);
    axum::serve(listener, app(AppState::new(pool))).await?;
    Ok(())
}
