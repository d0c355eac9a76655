//! Stack batches on the drift detection queue.
//!
//! One SQS message carries one batch: a JSON array of stacks. The queue is
//! FIFO with content-based deduplication; delivery is at-least-once.

use aws_lambda_events::event::sqs::SqsEvent;
use aws_sdk_sqs::Client;
use eyre::{eyre, WrapErr};

use driftwatch_core::models::Stack;
use driftwatch_detector::error::format_err_chain;

pub const MESSAGE_GROUP_ID: &str = "drift_detector";

pub fn encode_batch(stacks: &[Stack]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stacks)
}

pub fn decode_batch(body: &str) -> serde_json::Result<Vec<Stack>> {
    serde_json::from_str(body)
}

/// Decode every record of an SQS event into its batch of stacks.
pub fn event_batches(event: &SqsEvent) -> eyre::Result<Vec<Vec<Stack>>> {
    event
        .records
        .iter()
        .map(|record| {
            let id = record.message_id.as_deref().unwrap_or("<unknown>");
            let body = record
                .body
                .as_deref()
                .ok_or_else(|| eyre!("SQS message {id} has no body"))?;
            decode_batch(body).wrap_err_with(|| format!("SQS message {id} is not a stack batch"))
        })
        .collect()
}

/// Send each batch as one message. Returns the number of messages sent.
pub async fn send_batches(
    client: &Client,
    queue_url: &str,
    batches: &[Vec<Stack>],
) -> eyre::Result<usize> {
    for (index, stacks) in batches.iter().enumerate() {
        let resp = client
            .send_message()
            .queue_url(queue_url)
            .message_body(encode_batch(stacks)?)
            .message_group_id(MESSAGE_GROUP_ID)
            .send()
            .await
            .map_err(|e| eyre!("SQS SendMessage failed: {}", format_err_chain(&e)))?;

        tracing::info!(
            batch = index,
            stacks = stacks.len(),
            message_id = resp.message_id().unwrap_or_default(),
            "enqueued stack batch"
        );
    }

    Ok(batches.len())
}
