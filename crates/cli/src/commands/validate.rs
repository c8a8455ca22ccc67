// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `convoy validate` - Check a runbook without running anything

use anyhow::Result;
use clap::Args;
use convoy_engine::validate_definition;
use convoy_runbook::Runbook;
use std::process::ExitCode;

#[derive(Args)]
pub struct ValidateArgs {
    /// Pipeline to check; all pipelines when omitted
    pub pipeline: Option<String>,
}

pub fn validate(args: ValidateArgs, runbook: &Runbook) -> Result<ExitCode> {
    let names: Vec<String> = match args.pipeline {
        Some(name) => {
            if runbook.get_pipeline(&name).is_none() {
                anyhow::bail!("unknown pipeline: {}", name);
            }
            vec![name]
        }
        None => runbook
            .pipeline_names()
            .into_iter()
            .map(String::from)
            .collect(),
    };

    if names.is_empty() {
        anyhow::bail!("runbook defines no pipelines");
    }

    let mut failed = false;
    for name in &names {
        let Some(pipeline) = runbook.get_pipeline(name) else {
            continue;
        };
        match validate_definition(pipeline) {
            Ok(()) => println!("{}: ok ({} stages)", name, pipeline.stages.len()),
            Err(e) => {
                failed = true;
                eprintln!("{}: {}", name, e);
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
