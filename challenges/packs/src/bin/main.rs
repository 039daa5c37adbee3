use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::error;
use tokio::net::TcpListener;
use tokio::signal;

use packs::config::{load_pack_sizes, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[clap(name = "packs", about = "Serves pack calculations over HTTP")]
struct Cli {
    /// JSON file with the pack sizes, e.g. {"items": [250, 500, 1000]}
    #[clap(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[clap(short = 'p', long, default_value = "8080")]
    port: u16,
    #[clap(long, default_value = "0.0.0.0")]
    host: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let args = Cli::parse();
    let sizes = load_pack_sizes(&args.config)
        .with_context(|| format!("invalid pack size configuration in {}", args.config.display()))?;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to listen at {}", addr))?;

    packs::server::run(listener, sizes, async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    })
    .await?;
    Ok(())
}
