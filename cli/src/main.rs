//! homegame-ledger - terminal ledger for a home poker game.
//!
//! Tracks buy-in settings and player stacks for one session, reconciles
//! chips against buy-ins and prints payout instructions for settling up.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod repl;
mod store;
mod view;

/// Terminal ledger for a home poker game
#[derive(Parser, Debug)]
#[command(name = "homegame-ledger")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the ledger file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let path = cli.file.unwrap_or_else(default_ledger_path);
    tracing::debug!(path = %path.display(), "using ledger file");
    let mut store = store::FileStore::open(path);
    repl::run(&mut store)
}

/// `${XDG_DATA_HOME}/homegame-ledger/ledger.json`, with the usual
/// `~/.local/share` fallback. Without a home directory the file lands in
/// the current directory.
fn default_ledger_path() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local").join("share"))
        });
    match data_dir {
        Some(dir) => dir.join("homegame-ledger").join("ledger.json"),
        None => PathBuf::from("homegame-ledger.json"),
    }
}
