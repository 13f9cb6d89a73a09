// Friendzone - personal CRM server
// Entry point and server setup

use clap::Parser;
use friendzone::config::{Config, ServerCli};
use friendzone::{app, router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "friendzone=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Friendzone server");

    let config = Config::from_cli_and_env(ServerCli::parse());
    let state = app::setup(&config).await?;
    let router = router::build_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
