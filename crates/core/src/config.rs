// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Knobs for a coordinator run
///
/// Durations accept humantime strings ("90s", "1h 30m") when loaded from
/// configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Upper bound on concurrently executing stages within a parallel group
    pub max_parallel_stages: usize,
    /// Deadline for the non-always-run portion of the run
    #[serde(with = "humantime_serde")]
    pub overall_timeout: Duration,
    /// Deadline granted to always-run stages once the main portion has ended
    #[serde(with = "humantime_serde")]
    pub always_run_grace_period: Duration,
    /// Stop launching non-always-run stages after the first failure
    pub fail_fast: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_parallel_stages: 4,
            overall_timeout: Duration::from_secs(3600),
            always_run_grace_period: Duration::from_secs(120),
            fail_fast: true,
        }
    }
}

impl CoordinatorConfig {
    /// Tight limits for tests
    pub fn for_testing() -> Self {
        Self {
            max_parallel_stages: 2,
            overall_timeout: Duration::from_secs(5),
            always_run_grace_period: Duration::from_secs(1),
            fail_fast: true,
        }
    }
}
