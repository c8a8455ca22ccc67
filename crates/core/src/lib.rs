// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! convoy-core: Data model for the convoy pipeline coordinator
//!
//! This crate provides:
//! - The immutable [`BuildContext`] a pipeline run executes against
//! - Stage and pipeline result types with artifact retention
//! - Run conditions evaluated uniformly for every stage
//! - Coordinator configuration and cooperative cancellation

pub mod cancel;
pub mod condition;
pub mod config;
pub mod context;
pub mod id;
pub mod result;

pub use cancel::CancelToken;
pub use condition::RunCondition;
pub use config::CoordinatorConfig;
pub use context::{BuildContext, MissingVariable};
pub use id::short_build_id;
pub use result::{
    Artifact, OverallStatus, PipelineResult, RetentionPolicy, StageResult, StageStatus,
};
