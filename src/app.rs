//! Defines the read-only application state and the handling of a
//! single notification.

use crate::client::ObjectStore;
use crate::conf::Settings;
use crate::errors::{HandlerError, Result};
use crate::transform::{self, OutputFormat};
use crate::trigger::Trigger;
use aws_lambda_events::event::s3::S3Event;
use envy::from_env;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{info, instrument};

/// Why a notification was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The key is itself an output; handling it would loop forever.
    AlreadyOutputPrefix,
    NotInputPrefix,
    NotAnImageExtension,
}

/// The result of handling one notification, reported back to the
/// invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok { input: String, output: String },
    Skipped { reason: SkipReason, key: String },
}

/// An App is an initialized application state, derived from
/// settings.
#[derive(Debug)]
pub struct App {
    /// The original settings.
    pub settings: Settings,
}

impl App {
    /// Initialize an App instance given a settings struct. Consumes
    /// the settings struct.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        if !(1..=100).contains(&settings.jpeg_quality) {
            anyhow::bail!(
                "JPEG_QUALITY must be between 1 and 100, got {}",
                settings.jpeg_quality
            );
        }
        Ok(App { settings })
    }

    /// Checks a decoded key against the configured prefixes and the
    /// accepted extensions, in that order.
    pub fn skip_reason(&self, key: &str) -> Option<SkipReason> {
        if key.starts_with(&self.settings.output_prefix) {
            Some(SkipReason::AlreadyOutputPrefix)
        } else if !key.starts_with(&self.settings.input_prefix) {
            Some(SkipReason::NotInputPrefix)
        } else if !transform::has_image_extension(key) {
            Some(SkipReason::NotAnImageExtension)
        } else {
            None
        }
    }

    /// Handle a notification event. Only its first record is
    /// considered.
    pub async fn handle_event<S: ObjectStore>(&self, event: &S3Event, store: &S) -> Result<Outcome> {
        let trigger = Trigger::from_event(event)?;
        self.handle(&trigger, store).await
    }

    /// Handle an invocation trigger: fetch the object, convert it to
    /// grayscale and store it under the output prefix.
    #[instrument(skip(self, store))]
    pub async fn handle<S: ObjectStore>(&self, trigger: &Trigger, store: &S) -> Result<Outcome> {
        if let Some(reason) = self.skip_reason(&trigger.key) {
            info!(?reason, "Skipping object");
            return Ok(Outcome::Skipped {
                reason,
                key: trigger.key.clone(),
            });
        }

        let payload = store
            .get(&trigger.bucket, &trigger.key)
            .await
            .map_err(|source| HandlerError::Fetch {
                bucket: trigger.bucket.clone(),
                key: trigger.key.clone(),
                source,
            })?;
        info!(size = payload.len(), "Fetched object");

        let gray = transform::grayscale(&payload).map_err(|source| HandlerError::Decode {
            key: trigger.key.clone(),
            source,
        })?;
        drop(payload);

        let format = OutputFormat::for_key(&trigger.key, self.settings.jpeg_quality);
        let encoded = transform::encode(&gray, format).map_err(|source| HandlerError::Encode {
            key: trigger.key.clone(),
            source,
        })?;

        let output = transform::output_key(&trigger.key, &self.settings.output_prefix);
        store
            .put(
                &trigger.bucket,
                &output,
                encoded.bytes,
                encoded.content_type,
            )
            .await
            .map_err(|source| HandlerError::Store {
                bucket: trigger.bucket.clone(),
                key: output.clone(),
                source,
            })?;
        info!(%output, content_type = encoded.content_type, "Stored grayscale image");

        Ok(Outcome::Ok {
            input: trigger.key.clone(),
            output,
        })
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> anyhow::Result<()> {
    let settings = from_env()?;
    let app = App::new(settings)?;
    CURRENT
        .set(app)
        .map_err(|_| anyhow::anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}
