mod cli;
mod config;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use text_gate::TextGate;

use crate::cli::{Cli, Mode};

fn main() -> Result<()> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let mut cfg = config::load(&cli.config)?;
    if let Some(max) = cli.max_length {
        cfg.limits.max_length = max;
    }

    // 3. Init tracing-subscriber with JSON format.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // 4. Build the gate once; it is read-only from here on.
    let gate = TextGate::new(cfg.limits).context("failed to build text gate")?;

    info!(
        config_file = %cli.config.display(),
        max_length = gate.limits().max_length,
        mode = ?cli.mode,
        "textgate starting"
    );

    // 5. Take the text from the positional argument or stdin.
    let text = match cli.text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };

    // 6. Run the selected policy and print the outcome as JSON (or plain
    //    text for sanitize mode).
    match cli.mode {
        Mode::Validate => {
            let verdict = if cli.query {
                gate.sanitize_query(&text)
            } else {
                gate.validate(&text)
            };
            println!("{}", serde_json::to_string_pretty(&verdict)?);
            if !verdict.is_valid {
                std::process::exit(1);
            }
        }
        Mode::Sanitize => {
            println!("{}", gate.sanitize(&text));
        }
        Mode::Soft => {
            let softened = gate.validate_and_sanitize(&text);
            println!("{}", serde_json::to_string_pretty(&softened)?);
        }
    }

    Ok(())
}
