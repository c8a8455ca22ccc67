// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O
//!
//! Stage actions reach every collaborator (scanners, builders, registries,
//! orchestrator control planes) through the [`Invoker`] boundary; pipeline
//! completion reaches the notification transport through [`NotifyAdapter`].

pub mod invoke;
pub mod notify;

pub use invoke::{InvokeError, InvokeOutcome, InvokeRequest, Invoker, ProcessInvoker};
pub use notify::{NoOpNotifier, NotifyAdapter, NotifyError, PipelineNotice, WebhookNotifier};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use invoke::{FakeInvoker, InvokeCall, ScriptedOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifier;
