// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError, PipelineNotice};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Fake notification adapter recording every notice
///
/// Can be told to fail, for verifying that notification failure never
/// fails the pipeline.
#[derive(Clone, Default)]
pub struct FakeNotifier {
    notices: Arc<Mutex<Vec<PipelineNotice>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail
    pub fn fail_sends(&self) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Get all recorded notices
    pub fn notices(&self) -> Vec<PipelineNotice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifier {
    async fn send(&self, notice: &PipelineNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice.clone());
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(NotifyError::Failed("scripted failure".to_string()));
        }
        Ok(())
    }
}
