//! Store statistics CLI - one-shot report over a store's users, carts and products

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{fetch, report};

/// storestats - category totals, top cart and furthest users for a store
#[derive(Parser)]
#[command(name = "storestats", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the store data and print the report
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Read a saved dataset snapshot instead of calling the API
        #[arg(long)]
        from_file: Option<PathBuf>,
        #[command(flatten)]
        source: commands::SourceArgs,
    },

    /// Fetch the store data and save it as a JSON snapshot
    Fetch {
        /// Where to write the snapshot
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        source: commands::SourceArgs,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            json,
            from_file,
            source,
        } => report::run(json, from_file, &source).await,
        Commands::Fetch { output, source } => fetch::run(&output, &source).await,
    }
}
