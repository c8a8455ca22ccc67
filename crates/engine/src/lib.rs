// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! convoy execution engine
//!
//! The [`Coordinator`] runs a pipeline definition against an immutable
//! build context: stages execute in declaration order, parallel groups
//! run concurrently under a bounded limit, failures halt later
//! non-always-run stages, and always-run stages execute regardless.

mod coordinator;
mod error;
mod plan;

pub use coordinator::{validate_definition, Coordinator};
pub use error::ValidationError;
