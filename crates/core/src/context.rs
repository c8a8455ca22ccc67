// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable build context
//!
//! A [`BuildContext`] is created once at pipeline start and is read-only
//! for the rest of the run. Stages never write back into it; anything a
//! stage derives from the context stays local to that stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A context variable referenced by a stage is absent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing context variable: {0}")]
pub struct MissingVariable(pub String);

/// Read-only parameter set for a pipeline run
///
/// Holds string variables such as the branch name, build number,
/// target environment, image tag, and registry coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildContext {
    vars: BTreeMap<String, String>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder-style. Later values win.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Look up a variable, failing if it is absent
    pub fn require(&self, key: &str) -> Result<&str, MissingVariable> {
        self.get(key)
            .ok_or_else(|| MissingVariable(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Iterate variables in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Flat map view for template interpolation
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl FromIterator<(String, String)> for BuildContext {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
