//! `serve` subcommand

use tracing::info;

use crate::api::build_router;
use crate::config::AppConfig;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    let state = crate::create_app_state(config).await?;
    let router = build_router(state);

    info!("listening on {address}");
    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
