use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

use driftwatch_detector::CloudFormationProvider;
use driftwatch_lambda::config::DiscoverSettings;
use driftwatch_lambda::handlers::discover::{self, DiscoverSummary};
use driftwatch_lambda::telemetry;

struct Discover {
    cloudformation: CloudFormationProvider,
    sqs: aws_sdk_sqs::Client,
    settings: DiscoverSettings,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init();

    let settings = DiscoverSettings::from_env()?;
    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let stage = Discover {
        cloudformation: CloudFormationProvider::from_conf(&aws),
        sqs: aws_sdk_sqs::Client::new(&aws),
        settings,
    };
    let stage = &stage;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(stage, event).await
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}

async fn function_handler(
    stage: &Discover,
    _event: LambdaEvent<Value>,
) -> Result<DiscoverSummary, Error> {
    let summary = discover::handle(&stage.cloudformation, &stage.sqs, &stage.settings)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "discovery failed"))?;
    Ok(summary)
}
