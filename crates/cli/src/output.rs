// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use convoy_core::{PipelineResult, StageStatus};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a pipeline run report in the specified format
pub fn print_result(result: &PipelineResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
    }
}

fn render_text(result: &PipelineResult) -> String {
    let mut out = String::new();
    let elapsed = (result.finished_at - result.started_at)
        .to_std()
        .unwrap_or_default();
    out.push_str(&format!(
        "pipeline {}: {} ({} stages, {})\n",
        result.pipeline,
        result.overall_status,
        result.stages.len(),
        humantime::format_duration(round_to_millis(elapsed)),
    ));

    let name_width = result
        .stages
        .iter()
        .map(|s| s.stage_name.len())
        .max()
        .unwrap_or(0);
    for stage in &result.stages {
        let duration = match stage.status {
            StageStatus::Skipped => String::new(),
            _ => humantime::format_duration(round_to_millis(stage.duration)).to_string(),
        };
        out.push_str(&format!(
            "  {:<name_width$}  {:<8}  {}",
            stage.stage_name, stage.status, duration
        ));
        if let Some(detail) = &stage.error_detail {
            out.push_str(&format!("  ({})", detail));
        }
        out.push('\n');
    }
    out
}

// humantime spells out every sub-millisecond unit; trim to millis for
// readable rows
fn round_to_millis(d: std::time::Duration) -> std::time::Duration {
    std::time::Duration::from_millis(d.as_millis() as u64)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
