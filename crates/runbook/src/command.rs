// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run directives

use crate::template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a stage runs: a shell command line or a program with arguments
///
/// ```toml
/// run = "kubectl apply -f manifests/ -n {environment}"
/// run = { program = "trivy", args = ["image", "--severity", "HIGH,CRITICAL", "{image_tag}"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunDirective {
    /// Command line executed through `sh -c`
    Shell(String),
    /// Program invoked directly with arguments
    Exec {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl RunDirective {
    pub fn is_shell(&self) -> bool {
        matches!(self, RunDirective::Shell(_))
    }

    /// Get the shell command line, if this is a shell directive
    pub fn shell_command(&self) -> Option<&str> {
        match self {
            RunDirective::Shell(cmd) => Some(cmd),
            RunDirective::Exec { .. } => None,
        }
    }

    /// Collect `{var}` placeholders across the command text
    pub fn referenced_vars(&self) -> BTreeSet<String> {
        match self {
            RunDirective::Shell(cmd) => template::referenced_vars(cmd),
            RunDirective::Exec { program, args } => {
                let mut vars = template::referenced_vars(program);
                for arg in args {
                    vars.extend(template::referenced_vars(arg));
                }
                vars
            }
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
