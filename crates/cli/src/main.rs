// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! convoy - deployment pipeline coordinator CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{list, run, validate};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "convoy", version, about = "Deployment pipeline coordinator")]
struct Cli {
    /// Path to the runbook file
    #[arg(long, global = true, default_value = "convoy.toml")]
    runbook: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline from the runbook
    Run(run::RunArgs),
    /// Check a runbook without running anything
    Validate(validate::ValidateArgs),
    /// List pipelines defined in the runbook
    List(list::ListArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(ExitCode::SUCCESS);
    }

    let runbook = load_runbook(&cli.runbook)?;

    match cli.command {
        Commands::Run(args) => run::run(args, &runbook).await,
        Commands::Validate(args) => validate::validate(args, &runbook),
        Commands::List(args) => {
            list::list(args, &runbook);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions(_) => unreachable!(),
    }
}

fn load_runbook(path: &std::path::Path) -> Result<convoy_runbook::Runbook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read runbook: {}", path.display()))?;
    convoy_runbook::parse_runbook(&content)
        .with_context(|| format!("invalid runbook: {}", path.display()))
}
