use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use driftwatch_core::models::DetectionOutcome;
use driftwatch_lambda::config::NotifySettings;
use driftwatch_lambda::handlers::notify;
use driftwatch_lambda::telemetry;
use driftwatch_notify::SlackNotifier;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init();

    let settings = NotifySettings::from_env()?;
    let notifier = SlackNotifier::new(settings.notify);
    let notifier = &notifier;

    run(service_fn(move |event: LambdaEvent<DetectionOutcome>| async move {
        function_handler(notifier, event).await
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}

async fn function_handler(
    notifier: &SlackNotifier,
    event: LambdaEvent<DetectionOutcome>,
) -> Result<usize, Error> {
    let posted = notify::handle(notifier, &event.payload)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "slack notification failed"))?;
    Ok(posted)
}
