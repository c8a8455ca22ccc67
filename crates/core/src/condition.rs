// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage run conditions
//!
//! Every stage carries a [`RunCondition`] evaluated against the build
//! context before its action is dispatched. A false condition records the
//! stage as skipped without invoking its action.
//!
//! Conditions deserialize from small TOML tables:
//!
//! ```toml
//! when = { var = "branch", equals = "main" }
//! when = { var = "environment", not_equals = "production" }
//! when = { defined = "image_tag" }
//! when = { any_of = [{ var = "branch", equals = "main" }, { defined = "force" }] }
//! ```

use crate::context::{BuildContext, MissingVariable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Predicate over the build context gating a stage
///
/// Untagged: each form has a distinct key signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunCondition {
    /// Variable equals a literal value
    Equals { var: String, equals: String },
    /// Variable differs from a literal value
    NotEquals { var: String, not_equals: String },
    /// Variable is present, whatever its value
    Defined { defined: String },
    /// Negation
    Not { not: Box<RunCondition> },
    /// All sub-conditions hold
    AllOf { all_of: Vec<RunCondition> },
    /// At least one sub-condition holds
    AnyOf { any_of: Vec<RunCondition> },
    /// Run unconditionally (the default when `when` is omitted)
    Always,
}

impl Default for RunCondition {
    fn default() -> Self {
        RunCondition::Always
    }
}

impl RunCondition {
    /// Convenience constructor for the common branch gate
    pub fn equals(var: impl Into<String>, value: impl Into<String>) -> Self {
        RunCondition::Equals {
            var: var.into(),
            equals: value.into(),
        }
    }

    /// Evaluate against the context
    ///
    /// `Equals`/`NotEquals` on an absent variable is an error rather than
    /// false: the context must supply every variable a condition reads.
    /// `Defined` is the one probe that tolerates absence.
    pub fn evaluate(&self, ctx: &BuildContext) -> Result<bool, MissingVariable> {
        match self {
            RunCondition::Always => Ok(true),
            RunCondition::Equals { var, equals } => Ok(ctx.require(var)? == equals),
            RunCondition::NotEquals { var, not_equals } => Ok(ctx.require(var)? != not_equals),
            RunCondition::Defined { defined } => Ok(ctx.contains(defined)),
            RunCondition::Not { not } => Ok(!not.evaluate(ctx)?),
            RunCondition::AllOf { all_of } => {
                for c in all_of {
                    if !c.evaluate(ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            RunCondition::AnyOf { any_of } => {
                for c in any_of {
                    if c.evaluate(ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Collect the variables this condition requires the context to supply
    ///
    /// `Defined` probes are excluded since they never fail on absence.
    pub fn required_vars(&self, out: &mut BTreeSet<String>) {
        match self {
            RunCondition::Always | RunCondition::Defined { .. } => {}
            RunCondition::Equals { var, .. } | RunCondition::NotEquals { var, .. } => {
                out.insert(var.clone());
            }
            RunCondition::Not { not } => not.required_vars(out),
            RunCondition::AllOf { all_of: conds } | RunCondition::AnyOf { any_of: conds } => {
                for c in conds {
                    c.required_vars(out);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
