//! Moderation check CLI tool
//!
//! Runs lines of text through the content safety filter and prints the
//! verdict for each. Used to tune the blocklist against real samples.

use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use trustgate::Config;
use trustgate::core::moderation::{ContentSafetyFilter, ModerationMatch};
use trustgate::utils::logging::init_tracing;

#[derive(Debug, Parser)]
#[command(
    name = "moderation-check",
    version,
    about = "Screen text with the content safety filter"
)]
struct Args {
    /// Configuration file supplying extra blocked terms
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Text to check; reads lines from stdin when empty
    texts: Vec<String>,
}

#[derive(serde::Serialize)]
struct Verdict<'a> {
    text: &'a str,
    #[serde(flatten)]
    result: &'a ModerationMatch,
}

fn report(
    out: &mut impl Write,
    text: &str,
    result: &ModerationMatch,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let line = serde_json::to_string(&Verdict { text, result })?;
        writeln!(out, "{}", line)?;
    } else if result.blocked {
        let matches: Vec<&str> = result.matches.iter().map(String::as_str).collect();
        writeln!(out, "BLOCKED\t[{}]\t{}", matches.join(", "), text)?;
    } else {
        writeln!(out, "ok\t\t{}", text)?;
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    init_tracing(config.logging());

    let filter = ContentSafetyFilter::from_config(config.moderation());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut any_blocked = false;

    let mut screen = |text: &str| -> anyhow::Result<()> {
        let result = filter.detect(text);
        any_blocked |= result.blocked;
        report(&mut out, text, &result, args.json)
    };

    if args.texts.is_empty() {
        for line in std::io::stdin().lock().lines() {
            screen(&line.context("reading stdin")?)?;
        }
    } else {
        for text in &args.texts {
            screen(text)?;
        }
    }

    Ok(any_blocked)
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
