// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake invoker for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InvokeError, InvokeOutcome, InvokeRequest, Invoker};
use async_trait::async_trait;
use convoy_core::CancelToken;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded invocation
#[derive(Debug, Clone)]
pub struct InvokeCall {
    pub command_line: String,
    pub cwd: Option<std::path::PathBuf>,
    pub env: Vec<(String, String)>,
}

/// Scripted behavior for commands matching a pattern
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Sleep before finishing; observes the cancel token
    pub delay: Option<Duration>,
    /// Never finish until cancelled
    pub block_until_cancelled: bool,
}

impl ScriptedOutcome {
    pub fn exit(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn blocking() -> Self {
        Self {
            block_until_cancelled: true,
            ..Self::default()
        }
    }
}

/// Fake invoker recording calls and replaying scripted outcomes
///
/// Scripts match by substring against the flat command line; unmatched
/// commands succeed with exit code 0.
#[derive(Clone, Default)]
pub struct FakeInvoker {
    calls: Arc<Mutex<Vec<InvokeCall>>>,
    scripts: Arc<Mutex<Vec<(String, ScriptedOutcome)>>>,
}

impl FakeInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for commands whose line contains `pattern`
    pub fn script(&self, pattern: impl Into<String>, outcome: ScriptedOutcome) {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((pattern.into(), outcome));
    }

    /// Shorthand: commands matching `pattern` fail with the given exit code
    pub fn fail_on(&self, pattern: impl Into<String>, exit_code: i32) {
        self.script(pattern, ScriptedOutcome::exit(exit_code));
    }

    /// Get all recorded invocations
    pub fn calls(&self) -> Vec<InvokeCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether any recorded command line contains `pattern`
    pub fn invoked(&self, pattern: &str) -> bool {
        self.calls()
            .iter()
            .any(|c| c.command_line.contains(pattern))
    }

    fn lookup(&self, command_line: &str) -> ScriptedOutcome {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|(pattern, _)| command_line.contains(pattern.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Invoker for FakeInvoker {
    async fn invoke(
        &self,
        request: InvokeRequest,
        cancel: &CancelToken,
    ) -> Result<InvokeOutcome, InvokeError> {
        let command_line = request.command_line();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(InvokeCall {
                command_line: command_line.clone(),
                cwd: request.cwd.clone(),
                env: request.env.clone(),
            });

        let scripted = self.lookup(&command_line);

        if scripted.block_until_cancelled {
            cancel.cancelled().await;
            return Err(InvokeError::Cancelled);
        }

        if let Some(delay) = scripted.delay {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel.cancelled() => return Err(InvokeError::Cancelled),
            }
        } else if cancel.is_cancelled() {
            return Err(InvokeError::Cancelled);
        }

        Ok(InvokeOutcome {
            exit_code: scripted.exit_code,
            stdout: scripted.stdout,
            stderr: scripted.stderr,
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
