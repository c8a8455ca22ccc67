// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `convoy run <pipeline>` - Run a pipeline from the runbook

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use convoy_adapters::{NoOpNotifier, NotifyAdapter, ProcessInvoker, WebhookNotifier};
use convoy_core::{short_build_id, BuildContext, CancelToken, CoordinatorConfig};
use convoy_engine::Coordinator;
use convoy_runbook::Runbook;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline to run (e.g., "release")
    pub pipeline: String,

    /// Context variables (key=value), repeatable
    #[arg(short = 'v', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Shorthand for -v branch=<BRANCH>
    #[arg(long)]
    pub branch: Option<String>,

    /// Build number; generated when omitted
    #[arg(long)]
    pub build_number: Option<String>,

    /// Overall run timeout (e.g., "30m")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Maximum stages running concurrently
    #[arg(long)]
    pub max_parallel: Option<usize>,

    /// Keep running later stages after a failure
    #[arg(long)]
    pub no_fail_fast: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn run(args: RunArgs, runbook: &Runbook) -> Result<ExitCode> {
    let pipeline = runbook
        .get_pipeline(&args.pipeline)
        .ok_or_else(|| anyhow::anyhow!("unknown pipeline: {}", args.pipeline))?;

    let ctx = build_context(
        &pipeline.defaults,
        args.vars,
        args.branch,
        args.build_number,
    );

    let mut config = CoordinatorConfig::default();
    if let Some(timeout) = args.timeout {
        config.overall_timeout = timeout;
    }
    if let Some(max_parallel) = args.max_parallel {
        config.max_parallel_stages = max_parallel;
    }
    if args.no_fail_fast {
        config.fail_fast = false;
    }

    let notify: Box<dyn NotifyAdapter> = match &runbook.notify {
        Some(cfg) => {
            let mut notifier = WebhookNotifier::new(&cfg.url);
            if let Some(channel) = &cfg.channel {
                notifier = notifier.with_channel(channel);
            }
            Box::new(notifier)
        }
        None => Box::new(NoOpNotifier),
    };

    let cancel = CancelToken::new();
    let handler = cancel.clone();
    ctrlc::set_handler(move || handler.cancel())?;

    let coordinator = Coordinator::new(ProcessInvoker::new(), notify, config);
    let result = coordinator.run(&ctx, pipeline, cancel).await?;

    output::print_result(&result, args.format);

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Layer the context: pipeline defaults, then -v vars, then the
/// dedicated flags. build_number is always present, generated when not
/// supplied.
fn build_context(
    defaults: &std::collections::BTreeMap<String, String>,
    vars: Vec<(String, String)>,
    branch: Option<String>,
    build_number: Option<String>,
) -> BuildContext {
    let mut ctx = BuildContext::new();
    for (key, value) in defaults {
        ctx = ctx.with(key, value);
    }
    for (key, value) in vars {
        ctx = ctx.with(key, value);
    }
    if let Some(branch) = branch {
        ctx = ctx.with("branch", branch);
    }
    match build_number {
        Some(n) => ctx = ctx.with("build_number", n),
        None => {
            if !ctx.contains("build_number") {
                ctx = ctx.with("build_number", short_build_id());
            }
        }
    }
    ctx
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
