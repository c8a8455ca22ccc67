// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the coordinator

use thiserror::Error;

/// Definition or context problems, fatal before any stage runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pipeline {0} has no stages")]
    EmptyPipeline(String),
    #[error("duplicate stage name: {0}")]
    DuplicateStage(String),
    #[error("missing required input: {0}")]
    MissingInput(String),
    #[error("stage {stage}: missing context variable: {var}")]
    MissingVariable { stage: String, var: String },
}
