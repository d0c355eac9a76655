use serde_json::Value;

use driftwatch_core::models::DetectionOutcome;

use crate::error::NotifyError;
use crate::message::outcome_messages;

/// Where and how to report drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub webhook_url: String,
    /// List `IN_SYNC` resources alongside drifted ones.
    pub show_in_sync: bool,
}

/// Posts drift messages to a Slack incoming webhook.
pub struct SlackNotifier {
    client: reqwest::Client,
    config: NotifyConfig,
}

impl SlackNotifier {
    pub fn new(config: NotifyConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: NotifyConfig) -> Self {
        Self { client, config }
    }

    /// Post one message per failed and per completed stack.
    ///
    /// Stops at the first message Slack rejects. Returns the number of
    /// messages posted.
    pub async fn notify(&self, outcome: &DetectionOutcome) -> Result<usize, NotifyError> {
        let messages = outcome_messages(outcome, self.config.show_in_sync);
        for message in &messages {
            self.post(message).await?;
        }

        tracing::info!(
            messages = messages.len(),
            failed = outcome.failed.len(),
            drifted = outcome.drifted().count(),
            "posted drift notifications"
        );
        Ok(messages.len())
    }

    pub async fn post(&self, message: &Value) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.config.webhook_url)
            .json(message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Webhook {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
