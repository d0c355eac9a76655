use driftwatch_core::arn;
use driftwatch_core::models::{CheckedStack, DriftReport, ResourceDrift, Stack};

use crate::error::DetectorError;
use crate::provider::DriftProvider;

/// Fetch the resource drifts of every completed stack and build its report.
///
/// Only call this for stacks whose detection reached `DETECTION_COMPLETE`.
/// A listing failure aborts the whole run; there is no per-stack retry.
pub async fn aggregate(
    provider: &dyn DriftProvider,
    stacks: Vec<Stack>,
) -> Result<Vec<CheckedStack>, DetectorError> {
    let mut checked = Vec::with_capacity(stacks.len());

    for stack in stacks {
        let raw = provider.resource_drifts(&stack.stack_name).await?;
        let drift = raw
            .into_iter()
            .map(|r| ResourceDrift {
                physical_resource_id: arn::normalize(&r.physical_resource_id),
                resource_type: r.resource_type,
                drift_status: r.drift_status,
            })
            .collect();
        let report = DriftReport::from_resources(drift);

        tracing::info!(
            stack = %stack.stack_name,
            resources = report.resource_count,
            drifted = report.drifted_count,
            "aggregated stack drift"
        );
        checked.push(CheckedStack { stack, report });
    }

    Ok(checked)
}
