use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use driftwatch_detector::CloudFormationProvider;
use driftwatch_lambda::config::DetectSettings;
use driftwatch_lambda::handlers::detect;
use driftwatch_lambda::telemetry;

struct Detect {
    cloudformation: CloudFormationProvider,
    lambda: aws_sdk_lambda::Client,
    settings: DetectSettings,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init();

    let settings = DetectSettings::from_env()?;
    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let stage = Detect {
        cloudformation: CloudFormationProvider::from_conf(&aws),
        lambda: aws_sdk_lambda::Client::new(&aws),
        settings,
    };
    let stage = &stage;

    run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        function_handler(stage, event).await
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}

async fn function_handler(stage: &Detect, event: LambdaEvent<SqsEvent>) -> Result<(), Error> {
    detect::handle(
        &stage.cloudformation,
        &stage.lambda,
        &stage.settings,
        &event.payload,
    )
    .await
    .inspect_err(|e| tracing::error!(error = %e, "drift detection run failed"))?;
    Ok(())
}
