mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use engram::config::Config;
use engram::errors::Error;
use engram::MemoryStore;

use commands::Commands;
use output::{print_json, ErrorResponse};

/// engram - a local semantic memory store with retrieval-augmented recall
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit machine-readable JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let config = Config::load()?;
    config.ensure_directories()?;

    let mut store = MemoryStore::new(&config.database_path, config.embedding_dimensions)?;
    commands::execute(&cli.command, &mut store, &config, cli.json)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
