// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline definitions

use crate::command::RunDirective;
use crate::template;
use convoy_core::{Artifact, RunCondition};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A stage within a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDef {
    /// Stage name, unique within the pipeline
    pub name: String,
    /// What to run
    pub run: RunDirective,
    /// Gating condition, evaluated against the build context
    #[serde(default, rename = "when")]
    pub condition: RunCondition,
    /// Execute even after earlier failures, timeout, or cancellation
    #[serde(default)]
    pub always_run: bool,
    /// An always-run stage whose failure fails the whole pipeline
    #[serde(default)]
    pub required: bool,
    /// Stages sharing a group id execute concurrently
    #[serde(default)]
    pub parallel_group: Option<String>,
    /// Extra environment for the invoked command, values interpolated
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Working directory, interpolated; defaults to the invoking directory
    #[serde(default)]
    pub workdir: Option<String>,
    /// Files this stage produces, paths interpolated
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl StageDef {
    /// Collect every `{var}` this stage reads: command text, condition,
    /// env values, workdir, and artifact paths
    pub fn required_vars(&self) -> BTreeSet<String> {
        let mut vars = self.run.referenced_vars();
        self.condition.required_vars(&mut vars);
        for value in self.env.values() {
            vars.extend(template::referenced_vars(value));
        }
        if let Some(workdir) = &self.workdir {
            vars.extend(template::referenced_vars(workdir));
        }
        for artifact in &self.artifacts {
            vars.extend(template::referenced_vars(&artifact.path));
        }
        vars
    }
}

/// A pipeline definition from the runbook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDef {
    /// Pipeline name
    pub name: String,
    /// Required input variables
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Default values merged into the context when absent
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    /// Ordered stages; ordering is the primary sequencing invariant
    #[serde(default)]
    pub stages: Vec<StageDef>,
}

impl PipelineDef {
    /// Get a stage by name
    pub fn get_stage(&self, name: &str) -> Option<&StageDef> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Stage names in declaration order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    /// Union of required variables across all stages
    pub fn required_vars(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        for stage in &self.stages {
            vars.extend(stage.required_vars());
        }
        vars
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
