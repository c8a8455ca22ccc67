// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real process invoker on tokio::process

use super::{InvokeError, InvokeOutcome, InvokeRequest, Invoker};
use async_trait::async_trait;
use convoy_core::CancelToken;
use std::process::Stdio;

/// Invokes collaborators as child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn invoke(
        &self,
        request: InvokeRequest,
        cancel: &CancelToken,
    ) -> Result<InvokeOutcome, InvokeError> {
        let mut command = tokio::process::Command::new(&request.program);
        command
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(cwd) = &request.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &request.env {
            command.env(key, value);
        }

        let child = command.spawn().map_err(|source| InvokeError::Spawn {
            program: request.program.clone(),
            source,
        })?;

        let command_line = request.command_line();
        tokio::select! {
            output = child.wait_with_output() => {
                let output = output.map_err(|source| InvokeError::Spawn {
                    program: request.program.clone(),
                    source,
                })?;
                let exit_code = output.status.code().unwrap_or(-1);

                tracing::debug!(command = %command_line, exit_code, "invocation finished");

                Ok(InvokeOutcome {
                    exit_code,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            _ = cancel.cancelled() => {
                // Dropping the wait future drops the child; kill_on_drop
                // terminates the process before we return.
                tracing::info!(command = %command_line, "invocation cancelled");
                Err(InvokeError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
