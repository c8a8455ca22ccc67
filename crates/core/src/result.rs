// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage and pipeline results
//!
//! A [`StageResult`] is created once when a stage finishes and is never
//! modified afterward; the coordinator appends results to the log in
//! declaration order. A [`PipelineResult`] is finalized exactly once at
//! the end of a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal state of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Success,
    Failed,
    Skipped,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StageStatus::Success => "success",
            StageStatus::Failed => "failed",
            StageStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// Terminal state of the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Success,
    Failed,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallStatus::Success => write!(f, "success"),
            OverallStatus::Failed => write!(f, "failed"),
        }
    }
}

/// What happens to an artifact after the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Delete after the run
    Discard,
    /// Keep indefinitely
    Keep,
    /// Keep for a number of days
    KeepDays { days: u32 },
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy::Keep
    }
}

/// A file a stage declares it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub path: String,
    #[serde(default)]
    pub retention: RetentionPolicy,
}

/// Immutable record of one finished stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage_name: String,
    pub status: StageStatus,
    /// Artifacts in declaration order
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    #[serde(default)]
    pub error_detail: Option<String>,
}

impl StageResult {
    pub fn success(name: impl Into<String>, artifacts: Vec<Artifact>, duration: Duration) -> Self {
        Self {
            stage_name: name.into(),
            status: StageStatus::Success,
            artifacts,
            duration,
            error_detail: None,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        artifacts: Vec<Artifact>,
        duration: Duration,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            stage_name: name.into(),
            status: StageStatus::Failed,
            artifacts,
            duration,
            error_detail: Some(detail.into()),
        }
    }

    /// A stage whose run condition was false; its action never ran
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            stage_name: name.into(),
            status: StageStatus::Skipped,
            artifacts: Vec::new(),
            duration: Duration::ZERO,
            error_detail: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StageStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == StageStatus::Failed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == StageStatus::Skipped
    }
}

/// Final report of a pipeline run
///
/// `stages` preserves declaration order even when stages within a
/// parallel group completed out of order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub pipeline: String,
    pub overall_status: OverallStatus,
    pub stages: Vec<StageResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PipelineResult {
    pub fn is_success(&self) -> bool {
        self.overall_status == OverallStatus::Success
    }

    /// Look up a stage result by name
    pub fn stage(&self, name: &str) -> Option<&StageResult> {
        self.stages.iter().find(|s| s.stage_name == name)
    }

    /// Stage names in log order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.stage_name.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
