use serde::Serialize;

use driftwatch_core::batch;
use driftwatch_detector::{StackDiscovery, discover};

use crate::config::DiscoverSettings;
use crate::queue::send_batches;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoverSummary {
    pub stacks: usize,
    pub batches: usize,
}

/// List eligible stacks and enqueue them in batches for detection.
pub async fn handle(
    source: &dyn StackDiscovery,
    sqs: &aws_sdk_sqs::Client,
    settings: &DiscoverSettings,
) -> eyre::Result<DiscoverSummary> {
    let stacks = discover(source, &settings.filter).await?;
    let batches = batch(&stacks, settings.batch_size)?;
    let sent = send_batches(sqs, &settings.queue_url, &batches).await?;

    Ok(DiscoverSummary {
        stacks: stacks.len(),
        batches: sent,
    })
}
