// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runbook TOML parsing

use crate::pipeline::{PipelineDef, StageDef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during runbook parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Webhook notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub url: String,
    #[serde(default)]
    pub channel: Option<String>,
}

/// A parsed runbook
#[derive(Debug, Clone, Default)]
pub struct Runbook {
    pub pipelines: HashMap<String, PipelineDef>,
    pub notify: Option<NotifyConfig>,
}

impl Runbook {
    /// Get a pipeline definition by name
    pub fn get_pipeline(&self, name: &str) -> Option<&PipelineDef> {
        self.pipelines.get(name)
    }

    /// Pipeline names, sorted
    pub fn pipeline_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pipelines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Parse a runbook from TOML content
pub fn parse_runbook(content: &str) -> Result<Runbook, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    let mut runbook = Runbook::default();

    // Parse pipelines
    if let Some(pipelines) = table.get("pipeline").and_then(|v| v.as_table()) {
        for (name, value) in pipelines {
            let pipeline = parse_pipeline(name, value)?;
            runbook.pipelines.insert(name.clone(), pipeline);
        }
    }

    // Parse notification settings
    if let Some(webhook) = table
        .get("notify")
        .and_then(|v| v.as_table())
        .and_then(|t| t.get("webhook"))
    {
        let notify: NotifyConfig = webhook
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| {
                ParseError::InvalidFormat(format!("notify.webhook: {}", e))
            })?;
        runbook.notify = Some(notify);
    }

    Ok(runbook)
}

fn parse_pipeline(name: &str, value: &toml::Value) -> Result<PipelineDef, ParseError> {
    let table = value
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat(format!("pipeline.{} must be a table", name)))?;

    let inputs = table
        .get("inputs")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let defaults = table
        .get("defaults")
        .and_then(|v| v.as_table())
        .map(|t| {
            t.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();

    // Support both "stage" (from [[pipeline.X.stage]]) and "stages" key names
    let stages_arr = table
        .get("stage")
        .and_then(|v| v.as_array())
        .or_else(|| table.get("stages").and_then(|v| v.as_array()));

    let mut stages = Vec::new();
    if let Some(arr) = stages_arr {
        for value in arr {
            stages.push(parse_stage(name, value)?);
        }
    }

    Ok(PipelineDef {
        name: name.to_string(),
        inputs,
        defaults,
        stages,
    })
}

fn parse_stage(pipeline: &str, value: &toml::Value) -> Result<StageDef, ParseError> {
    let stage_name = value
        .as_table()
        .and_then(|t| t.get("name"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| ParseError::MissingField(format!("pipeline.{}.stage.name", pipeline)))?
        .to_string();

    // Deserialize using serde to get proper handling of run/when/artifacts
    let stage: StageDef = value.clone().try_into().map_err(|e: toml::de::Error| {
        ParseError::InvalidFormat(format!("pipeline.{}.stage.{}: {}", pipeline, stage_name, e))
    })?;
    Ok(stage)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
