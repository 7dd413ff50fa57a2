#![forbid(unsafe_code)]
//! Command-line client for a Blockworld server

use blockworld::config::{load_config, DEFAULT_CONFIG_FILE};
use blockworld::BlockworldClient;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "blockworld", version, about = "Drive a Blockworld game server over HTTP")]
struct Cli {
    /// Server origin, e.g. http://raspberrypi.local:8080
    #[arg(long, global = true)]
    url: Option<String>,

    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Request timeout, e.g. "5s"
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Fail on non-2xx responses
    #[arg(long, global = true)]
    strict: bool,

    /// Print lists as a JSON array
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List players
    Players,
    /// Create a player
    Create { player: String },
    /// Delete a player
    Delete { player: String },
    /// Move a player's cursor (up, down, left, right)
    Move { player: String, direction: String },
    /// Place the player's selected block at their cursor
    Place { player: String },
    /// Select the block a player places
    SetBlock { player: String, block: String },
    /// Regenerate the world from a seed
    Generate { seed: String },
    /// List block kinds
    Blocks,
    /// Show a block's color
    Color { block: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&cli.config)?.client;
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    config.strict_status |= cli.strict;

    let client = BlockworldClient::new(config)?;

    match cli.command {
        Command::Players => print_list(&client.players().await?, cli.json)?,
        Command::Blocks => print_list(&client.blocks().await?, cli.json)?,
        Command::Color { block } => {
            let color = client.block_color(&block).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "block": block, "color": color }));
            } else {
                println!("{}", color);
            }
        }
        Command::Create { player } => client.create_player(&player).await?,
        Command::Delete { player } => client.delete_player(&player).await?,
        Command::Move { player, direction } => client.player_move(&player, &direction).await?,
        Command::Place { player } => client.player_place_block(&player).await?,
        Command::SetBlock { player, block } => client.set_player_block(&player, &block).await?,
        Command::Generate { seed } => client.generate_world(&seed).await?,
    }

    Ok(())
}

fn print_list(items: &[String], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(items)?);
    } else {
        for item in items {
            println!("{}", item);
        }
    }
    Ok(())
}
