//! Defines configuration as read from the environment.

use serde::Deserialize;

/// Default `input_prefix` value.
fn default_input_prefix() -> String {
    String::from("incoming/")
}

/// Default `output_prefix` value.
fn default_output_prefix() -> String {
    String::from("grayscale/")
}

/// Default `jpeg_quality` value.
fn default_jpeg_quality() -> u8 {
    90
}

/// The handler is configured to take images stored under one prefix
/// of a bucket, and to write their grayscale versions under another
/// prefix of the same bucket. The configuration must be given as
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Keys must start with this prefix to be processed at all.
    #[serde(default = "default_input_prefix")]
    pub input_prefix: String,

    /// Converted images are written under this prefix. Keys that
    /// already start with it are never processed, so that input and
    /// output may share a bucket without triggering each other
    /// endlessly.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// Quality used when re-encoding JPEG outputs, from 1 to 100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_prefix: default_input_prefix(),
            output_prefix: default_output_prefix(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> envy::Result<Settings> {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (String::from(*k), String::from(*v))),
        )
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = from_pairs(&[]).unwrap();
        assert_eq!(settings.input_prefix, "incoming/");
        assert_eq!(settings.output_prefix, "grayscale/");
        assert_eq!(settings.jpeg_quality, 90);
    }

    #[test]
    fn variables_override_defaults() {
        let settings = from_pairs(&[
            ("INPUT_PREFIX", "uploads/raw/"),
            ("OUTPUT_PREFIX", "uploads/gray/"),
            ("JPEG_QUALITY", "75"),
        ])
        .unwrap();
        assert_eq!(settings.input_prefix, "uploads/raw/");
        assert_eq!(settings.output_prefix, "uploads/gray/");
        assert_eq!(settings.jpeg_quality, 75);
    }

    #[test]
    fn non_numeric_quality_is_rejected() {
        assert!(from_pairs(&[("JPEG_QUALITY", "high")]).is_err());
    }
}
