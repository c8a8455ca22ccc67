// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wave planning
//!
//! The coordinator executes stages wave by wave: consecutive stages
//! sharing a parallel group id form one concurrent wave, everything else
//! is a singleton wave. Waves run in declaration order and a wave is
//! joined completely before the next one starts.

use convoy_runbook::StageDef;

/// Indices into the pipeline's stage list forming one execution step
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Wave {
    pub members: Vec<usize>,
}

impl Wave {
    pub fn is_parallel(&self) -> bool {
        self.members.len() > 1
    }
}

/// Group stages into waves, preserving declaration order
pub(crate) fn plan_waves(stages: &[StageDef]) -> Vec<Wave> {
    let mut waves: Vec<Wave> = Vec::new();

    for (idx, stage) in stages.iter().enumerate() {
        let joins_previous = match (&stage.parallel_group, waves.last()) {
            (Some(group), Some(last)) => last
                .members
                .last()
                .and_then(|&i| stages[i].parallel_group.as_ref())
                .is_some_and(|g| g == group),
            _ => false,
        };

        if joins_previous {
            if let Some(last) = waves.last_mut() {
                last.members.push(idx);
            }
        } else {
            waves.push(Wave { members: vec![idx] });
        }
    }

    waves
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
