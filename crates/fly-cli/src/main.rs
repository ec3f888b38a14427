//! fly CLI - file operations on local disk or S3.

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fly")]
#[command(about = "Storage-agnostic file operations on local disk or S3", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Configuration file selecting the backend
    #[arg(long, env = "FLY_CONFIG", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Use a local directory as the backend (overrides --config)
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    commands::run(cli).await
}

/// Log to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_writer(std::io::stderr)
        .init();
}
