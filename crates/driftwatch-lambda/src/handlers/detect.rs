use aws_lambda_events::event::sqs::SqsEvent;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use eyre::eyre;

use driftwatch_core::models::DetectionOutcome;
use driftwatch_detector::error::format_err_chain;
use driftwatch_detector::{DriftProvider, Orchestrator};

use crate::config::DetectSettings;
use crate::queue::event_batches;

/// Run drift detection for every batch in the event and hand each outcome
/// to the notify stage.
///
/// Any error fails the invocation so SQS redelivers the batch.
pub async fn handle(
    provider: &dyn DriftProvider,
    lambda: &aws_sdk_lambda::Client,
    settings: &DetectSettings,
    event: &SqsEvent,
) -> eyre::Result<()> {
    let orchestrator = Orchestrator::new(provider, settings.detector.clone());

    for stacks in event_batches(event)? {
        tracing::info!(stacks = stacks.len(), "detecting drift for batch");
        let outcome = orchestrator.detect(&stacks).await?;
        invoke_notification(lambda, &settings.notification_function, &outcome).await?;
    }

    Ok(())
}

/// Fire-and-forget invocation of the notify function.
async fn invoke_notification(
    lambda: &aws_sdk_lambda::Client,
    function: &str,
    outcome: &DetectionOutcome,
) -> eyre::Result<()> {
    let payload = serde_json::to_vec(outcome)?;

    lambda
        .invoke()
        .function_name(function)
        .invocation_type(InvocationType::Event)
        .payload(Blob::new(payload))
        .send()
        .await
        .map_err(|e| eyre!("Lambda Invoke of {function} failed: {}", format_err_chain(&e)))?;

    tracing::info!(
        function,
        completed = outcome.completed.len(),
        failed = outcome.failed.len(),
        "notification dispatched"
    );
    Ok(())
}
