//! Defines a _trigger_, the input for the handling of an event. The
//! trigger is built from the S3 event.

use crate::errors::{HandlerError, Result};
use aws_lambda_events::event::s3::S3Event;
use percent_encoding::percent_decode_str;
use tracing::{debug, instrument};

/// The object an invocation is about: a bucket and a decoded key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub bucket: String,
    pub key: String,
}

impl Trigger {
    /// Builds a trigger from an already decoded key.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Trigger {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Builds the trigger from the first record inside an S3
    /// event. Any other record is ignored.
    #[instrument(skip_all)]
    pub fn from_event(event: &S3Event) -> Result<Self> {
        let record = event
            .records
            .first()
            .ok_or_else(|| HandlerError::invalid_event("the event holds no records"))?;
        if event.records.len() > 1 {
            debug!(
                "Event holds {} records; only the first one is handled",
                event.records.len()
            );
        }
        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .ok_or_else(|| HandlerError::invalid_event("the record has no bucket name"))?;
        let key = record
            .s3
            .object
            .key
            .as_deref()
            .ok_or_else(|| HandlerError::invalid_event("the record has no object key"))?;
        Ok(Trigger::new(bucket, decode_key(key)))
    }
}

/// Decodes an object key as it's found in S3 notifications: form
/// encoding, where `+` stands for a space and everything else is
/// percent-escaped. Invalid UTF-8 sequences become U+FFFD.
pub fn decode_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::event::s3::{S3Bucket, S3Entity, S3EventRecord, S3Object};

    fn record(bucket: Option<&str>, key: Option<&str>) -> S3EventRecord {
        S3EventRecord {
            s3: S3Entity {
                bucket: S3Bucket {
                    name: bucket.map(String::from),
                    ..Default::default()
                },
                object: S3Object {
                    key: key.map(String::from),
                    ..Default::default()
                },
                schema_version: Some(String::from("1.0")),
                configuration_id: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn plus_and_percent_escapes_are_decoded() {
        assert_eq!(
            decode_key("incoming/my+file%20name.png"),
            "incoming/my file name.png"
        );
        assert_eq!(decode_key("incoming/a%2Bb.jpg"), "incoming/a+b.jpg");
        assert_eq!(decode_key("incoming/caf%C3%A9.jpg"), "incoming/café.jpg");
    }

    #[test]
    fn malformed_escapes_are_kept_verbatim() {
        assert_eq!(decode_key("incoming/100%.png"), "incoming/100%.png");
        assert_eq!(decode_key("incoming/%ff.png"), "incoming/\u{fffd}.png");
    }

    #[test]
    fn first_record_is_used() {
        let event = S3Event {
            records: vec![
                record(Some("photos"), Some("incoming/first+one.png")),
                record(Some("photos"), Some("incoming/second.png")),
            ],
        };
        assert_eq!(
            Trigger::from_event(&event).unwrap(),
            Trigger::new("photos", "incoming/first one.png")
        );
    }

    #[test]
    fn empty_event_is_invalid() {
        let event = S3Event { records: vec![] };
        assert!(matches!(
            Trigger::from_event(&event),
            Err(HandlerError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn missing_fields_are_invalid() {
        for event in [
            S3Event {
                records: vec![record(None, Some("incoming/a.png"))],
            },
            S3Event {
                records: vec![record(Some("photos"), None)],
            },
        ] {
            assert!(matches!(
                Trigger::from_event(&event),
                Err(HandlerError::InvalidEvent { .. })
            ));
        }
    }

    #[test]
    fn event_json_is_understood() {
        let event: S3Event =
            serde_json::from_str(include_str!("../tests/fixtures/s3-put-event.json")).unwrap();
        assert_eq!(
            Trigger::from_event(&event).unwrap(),
            Trigger::new("photos", "incoming/my file name.png")
        );
    }
}
