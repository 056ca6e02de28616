//! trustgate - trust and safety service
//!
//! Serves content screening and identity disclosure over HTTP.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use trustgate::server::builder::{DEFAULT_CONFIG_PATH, load_config, run_server};
use trustgate::utils::logging::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "trustgate", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "TRUSTGATE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Run database migrations before serving
    #[arg(long)]
    migrate: bool,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let (config, source) = load_config(&args.config)
        .await
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;

    init_tracing(config.logging());
    source.log();

    run_server(config, args.migrate)
        .await
        .context("running server")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Alternate formatting prints the whole context chain
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
