use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hand_replayer::store::ScenarioStore;
use hand_replayer::web;
use hand_replayer::{Replayer, ReplayerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "hand-replayer",
    version,
    about = "Poker hand-history replay trainer (Rust edition)",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of hands to play (defaults to 1)
    #[arg(long, default_value_t = 1)]
    hands: u32,

    /// RNG seed for hand selection (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between playback steps, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 800)]
    delay_ms: u64,

    /// How long verdict feedback lingers before auto-hiding, in milliseconds
    #[arg(long = "feedback-ms", default_value_t = 3000)]
    feedback_ms: u64,

    /// Disable ANSI colors in CLI output
    #[arg(long = "no-color", default_value_t = false)]
    no_color: bool,

    /// JSON file with hand histories (built-in samples if omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Hide the running pot size
    #[arg(long = "no-pot", default_value_t = false)]
    no_pot: bool,

    /// Hide per-seat action badges
    #[arg(long = "no-badges", default_value_t = false)]
    no_badges: bool,

    /// Auto-answer with the first offered move (useful for smoke tests)
    #[arg(long, default_value_t = false)]
    auto: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to bind (HOST:PORT)
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,

        /// JSON file with hand histories (built-in samples if omitted)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = color_eyre::install();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { addr, data }) => run_server(addr, data).await?,
        None => run_cli(cli).await?,
    }

    Ok(())
}

async fn run_cli(cli: Cli) -> Result<()> {
    let config = ReplayerConfig {
        hands: cli.hands,
        step_delay_ms: cli.delay_ms,
        seed: cli.seed,
        no_color: cli.no_color,
        data: cli.data,
        show_pot_size: !cli.no_pot,
        show_per_seat_action: !cli.no_badges,
        feedback_auto_hide_ms: Some(cli.feedback_ms),
    };
    let mut replayer = Replayer::new(config);
    if cli.auto {
        replayer.autoplay().await?;
        replayer.print_summary();
        Ok(())
    } else {
        replayer.run().await
    }
}

async fn run_server(addr: String, data: Option<PathBuf>) -> Result<()> {
    let addr: SocketAddr = addr.parse()?;
    let store = Arc::new(ScenarioStore::load_or_sample(data.as_deref()));
    web::serve(addr, store).await
}
