//! Defines the object store seam and the global S3 client.

use anyhow::{anyhow, Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use once_cell::sync::OnceCell;
use std::env;
use std::future::Future;

/// The two operations the handler needs from storage.
pub trait ObjectStore: Sync {
    /// Reads the full contents of an object.
    fn get(&self, bucket: &str, key: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Writes an object, replacing any existing one under the same
    /// key.
    fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl ObjectStore for Client {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to download object {:?} from bucket {:?}",
                    key, bucket
                )
            })?;
        let body = response.body.collect().await.with_context(|| {
            format!(
                "Failed to read the contents of object {:?} from bucket {:?}",
                key, bucket
            )
        })?;
        Ok(body.into_bytes().to_vec())
    }

    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to upload object {:?} to bucket {:?}",
                    key, bucket
                )
            })?;
        Ok(())
    }
}

/// Global S3 client instance.
static CURRENT: OnceCell<Client> = OnceCell::new();

/// Initialize the global S3 client.
pub async fn init() -> Result<()> {
    let endpoint_url_var = env::var("AWS_ENDPOINT_URL");
    let client = if let Ok(endpoint_url) = endpoint_url_var {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(
                if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
                    endpoint_url
                } else {
                    format!("https://{}", endpoint_url)
                },
            )
            .region(Region::new("us-east-1")) // should be OK since the endpoint was overridden
            .load()
            .await;
        // S3-compatible stores rarely support virtual-hosted buckets
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();
        Client::from_conf(s3_config)
    } else {
        Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await)
    };
    CURRENT
        .set(client)
        .map_err(|_| anyhow!("client::CURRENT was already initialized"))
}

/// Get the current S3 client instance, or panic if it hasn't been initialized.
pub fn current() -> &'static Client {
    CURRENT.get().expect("client is not initialized")
}
