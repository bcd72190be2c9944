//! Defines the errors an invocation may end with. Guard mismatches
//! aren't errors; see [`crate::app::Outcome`].

use thiserror::Error;

/// An error that aborts the handling of a single event. None of these
/// are retried here: they're handed back to the invoking platform.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid notification event: {reason}")]
    InvalidEvent { reason: String },

    #[error("Failed to fetch object {key:?} from bucket {bucket:?}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to decode object {key:?} as an image")]
    Decode {
        key: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode the grayscale version of {key:?}")]
    Encode {
        key: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to store object {key:?} in bucket {bucket:?}")]
    Store {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, HandlerError>;

impl HandlerError {
    pub fn invalid_event(reason: impl Into<String>) -> Self {
        HandlerError::InvalidEvent {
            reason: reason.into(),
        }
    }
}
