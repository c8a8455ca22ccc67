// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook notification via JSON POST

use super::{NotifyAdapter, NotifyError, PipelineNotice};
use async_trait::async_trait;

/// Posts completion notices to a webhook endpoint
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    channel: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel: None,
        }
    }

    /// Default channel applied when the notice carries none
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    fn payload(&self, notice: &PipelineNotice) -> serde_json::Value {
        let channel = notice.channel.as_ref().or(self.channel.as_ref());
        serde_json::json!({
            "pipeline": notice.pipeline,
            "status": notice.status.to_string(),
            "text": notice.message,
            "channel": channel,
        })
    }
}

#[async_trait]
impl NotifyAdapter for WebhookNotifier {
    async fn send(&self, notice: &PipelineNotice) -> Result<(), NotifyError> {
        let url = self.url.clone();
        let body = serde_json::to_string(&self.payload(notice))
            .map_err(|e| NotifyError::Failed(e.to_string()))?;

        // ureq is blocking; keep it off the coordinator's task
        let result = tokio::task::spawn_blocking(move || {
            ureq::post(&url)
                .header("content-type", "application/json")
                .send(&body)
        })
        .await
        .map_err(|e| NotifyError::Failed(e.to_string()))?;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(NotifyError::Webhook(e.to_string())),
        }
    }
}
