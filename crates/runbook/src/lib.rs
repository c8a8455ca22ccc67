// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Runbook parsing and pipeline definitions

mod command;
mod parser;
mod pipeline;
mod template;

pub use command::RunDirective;
pub use parser::{parse_runbook, NotifyConfig, ParseError, Runbook};
pub use pipeline::{PipelineDef, StageDef};
pub use template::{interpolate, referenced_vars};
