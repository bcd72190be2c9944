use anyhow::{anyhow, Result};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use s3_grayscale::app::{self, Outcome};
use s3_grayscale::client;

/// Convert the image named by the first S3 event record to grayscale
async fn function_handler(event: LambdaEvent<S3Event>) -> Result<Outcome, Error> {
    Ok(app::current()
        .handle_event(&event.payload, client::current())
        .await?)
}

/// Run an AWS Lambda function that listens to S3 object-creation
/// events, and that writes grayscale versions of the created images
/// under the output prefix of the same bucket.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init().await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
