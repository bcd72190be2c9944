use anyhow::{Context, Result};
use s3_grayscale::trigger::Trigger;
use s3_grayscale::{app, client};
use std::env::var;

/// Convert a single object to grayscale, as if it had just been
/// created. The object is named by the `BUCKET` and `KEY` variables;
/// the key is taken as-is, without any decoding. The outcome is
/// printed as JSON.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
    app::init()?;
    client::init().await?;

    let bucket = var("BUCKET").context("BUCKET is required")?;
    let key = var("KEY").context("KEY is required")?;
    let trigger = Trigger::new(bucket, key);

    let outcome = app::current()
        .handle(&trigger, client::current())
        .await
        .with_context(|| format!("Failed to handle {:?}", &trigger))?;
    println!("{}", serde_json::to_string(&outcome)?);

    Ok(())
}
