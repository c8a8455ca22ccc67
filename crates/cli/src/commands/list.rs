// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `convoy list` - List pipelines defined in the runbook

use crate::output::OutputFormat;
use clap::Args;
use convoy_runbook::Runbook;

#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn list(args: ListArgs, runbook: &Runbook) {
    let names = runbook.pipeline_names();

    match args.format {
        OutputFormat::Text => {
            if names.is_empty() {
                println!("No pipelines");
                return;
            }
            for name in names {
                if let Some(pipeline) = runbook.get_pipeline(name) {
                    println!("{:<24} {} stages", name, pipeline.stages.len());
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = names
                .iter()
                .filter_map(|name| runbook.get_pipeline(name))
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "stages": p.stage_names(),
                        "inputs": p.inputs,
                    })
                })
                .collect();
            if let Ok(json) = serde_json::to_string_pretty(&entries) {
                println!("{}", json);
            }
        }
    }
}
