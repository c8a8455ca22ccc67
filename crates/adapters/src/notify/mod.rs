// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification transport boundary
//!
//! Fired once per pipeline run, after the result is finalized.
//! Delivery is fire-and-forget: a failed notification is logged and
//! never fails the pipeline.

mod webhook;

pub use webhook::WebhookNotifier;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifier;

use async_trait::async_trait;
use convoy_core::OverallStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
    #[error("webhook error: {0}")]
    Webhook(String),
}

/// Completion notice for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineNotice {
    pub pipeline: String,
    pub status: OverallStatus,
    pub message: String,
    pub channel: Option<String>,
}

impl PipelineNotice {
    pub fn new(
        pipeline: impl Into<String>,
        status: OverallStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            pipeline: pipeline.into(),
            status,
            message: message.into(),
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

/// Adapter trait for notification delivery
#[async_trait]
pub trait NotifyAdapter: Send + Sync + 'static {
    /// Send a completion notice
    async fn send(&self, notice: &PipelineNotice) -> Result<(), NotifyError>;
}

#[async_trait]
impl NotifyAdapter for Box<dyn NotifyAdapter> {
    async fn send(&self, notice: &PipelineNotice) -> Result<(), NotifyError> {
        (**self).send(notice).await
    }
}

/// Discards all notices
#[derive(Debug, Clone, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl NotifyAdapter for NoOpNotifier {
    async fn send(&self, _notice: &PipelineNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}
