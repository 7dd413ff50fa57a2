#![forbid(unsafe_code)]
//! In-memory Blockworld game server

use blockworld::config::{load_config, DEFAULT_CONFIG_FILE};
use blockworld::server::run_server;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blockworld-server", version, about = "Serve the Blockworld HTTP API")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[arg(long)]
    bind: Option<SocketAddr>,

    /// World height in blocks
    #[arg(long)]
    rows: Option<usize>,

    /// World width in blocks
    #[arg(long)]
    cols: Option<usize>,

    /// Directory to serve under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = load_config(&args.config)?.server;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if args.static_dir.is_some() {
        config.static_dir = args.static_dir;
    }

    run_server(config).await
}
