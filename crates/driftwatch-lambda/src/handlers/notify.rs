use driftwatch_core::models::DetectionOutcome;
use driftwatch_notify::SlackNotifier;

/// Post the outcome of one detection run to Slack.
pub async fn handle(notifier: &SlackNotifier, outcome: &DetectionOutcome) -> eyre::Result<usize> {
    if outcome.is_empty() {
        tracing::info!("nothing to report");
        return Ok(0);
    }
    Ok(notifier.notify(outcome).await?)
}
