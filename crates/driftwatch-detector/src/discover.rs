use driftwatch_core::StackFilter;
use driftwatch_core::models::Stack;

use crate::error::DetectorError;
use crate::provider::StackDiscovery;

/// List every stack and keep those drift detection can run against.
pub async fn discover(
    source: &dyn StackDiscovery,
    filter: &StackFilter,
) -> Result<Vec<Stack>, DetectorError> {
    let all = source.list_stacks().await?;
    let total = all.len();
    let eligible = filter.filter(all);

    tracing::info!(total, eligible = eligible.len(), "discovered stacks");
    Ok(eligible)
}
