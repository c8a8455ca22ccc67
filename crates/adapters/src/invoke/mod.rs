// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command invocation boundary
//!
//! Every external collaborator is invoked as `(program, arguments,
//! working directory, environment) -> (exit code, stdout, stderr)`.
//! Nothing behind this boundary is reimplemented.

mod process;

pub use process::ProcessInvoker;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeInvoker, InvokeCall, ScriptedOutcome};

use async_trait::async_trait;
use convoy_core::CancelToken;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the invocation boundary
///
/// A collaborator's non-zero exit is not an error here; it is reported
/// through [`InvokeOutcome::exit_code`].
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invocation cancelled")]
    Cancelled,
}

/// A single command to invoke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeRequest {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; inherits the coordinator's when unset
    pub cwd: Option<PathBuf>,
    /// Extra environment, additive over the inherited one
    pub env: Vec<(String, String)>,
}

impl InvokeRequest {
    /// A command line executed through `sh -c`
    pub fn shell(command: impl Into<String>) -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), command.into()],
            cwd: None,
            env: Vec::new(),
        }
    }

    /// A program invoked directly with arguments
    pub fn exec(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: None,
            env: Vec::new(),
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    /// Flat command line, used for logging and fake matching
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// What an invoked collaborator produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl InvokeOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Boundary to external collaborators
#[async_trait]
pub trait Invoker: Send + Sync + 'static {
    /// Run the command to completion, observing the cancel token
    ///
    /// Implementations terminate the spawned process when the token is
    /// raised and return [`InvokeError::Cancelled`].
    async fn invoke(
        &self,
        request: InvokeRequest,
        cancel: &CancelToken,
    ) -> Result<InvokeOutcome, InvokeError>;
}
