// Friendzone terminal client

use std::path::PathBuf;

use clap::Parser;
use friendzone::app::AppState;
use friendzone::client::{repl, App, CrmApi, HttpApi, LocalApi};
use friendzone::config::DEFAULT_SERVER_URL;
use friendzone::database::create_pool;
use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal UI for the Friendzone server.
#[derive(Parser, Debug)]
#[command(name = "friendzone-cli", version, about)]
struct Cli {
    /// Server base URL
    #[arg(long, short = 's', env = "FRIENDZONE_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Open a database file directly instead of talking to a server
    #[arg(long, value_name = "DB")]
    local: Option<PathBuf>,
}

async fn run<A: CrmApi>(api: A) -> anyhow::Result<()> {
    let mut app = App::new(api);
    repl::run(&mut app, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the rendered view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "friendzone=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.local {
        Some(db_path) => {
            let pool = create_pool(&db_path).await?;
            run(LocalApi::new(AppState::new(pool))).await
        }
        None => {
            let api = HttpApi::new(cli.server)?;
            match api.healthcheck().await {
                Ok(health) => tracing::info!("Server is {} at {}", health.status, health.timestamp),
                Err(e) => tracing::warn!("Healthcheck failed: {}", e),
            }
            run(api).await
        }
    }
}
