//! Image handling: decoding a payload, reducing it to a single
//! luminance channel, and encoding it back in the format implied by
//! the original key.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder, ImageResult};

/// Extensions accepted as images, lowercased.
const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Whether the key names a PNG or JPEG file, ignoring case.
pub fn has_image_extension(key: &str) -> bool {
    let lower = key.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// The key under which the grayscale version of `key` is stored: the
/// last path segment of `key`, placed under `output_prefix`.
pub fn output_key(key: &str, output_prefix: &str) -> String {
    let filename = key.rsplit('/').next().unwrap_or(key);
    format!("{}{}", output_prefix, filename)
}

/// The encoding used for an output object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// PNG inputs stay PNG; anything else becomes a JPEG.
    pub fn for_key(key: &str, jpeg_quality: u8) -> Self {
        if key.to_lowercase().ends_with(".png") {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg {
                quality: jpeg_quality,
            }
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// An encoded image, ready to be stored.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Decodes a PNG or JPEG payload and converts it to 8-bit
/// grayscale. Any alpha channel is discarded.
pub fn grayscale(payload: &[u8]) -> ImageResult<GrayImage> {
    Ok(image::load_from_memory(payload)?.to_luma8())
}

/// Encodes a grayscale image.
pub fn encode(image: &GrayImage, format: OutputFormat) -> ImageResult<EncodedImage> {
    let mut bytes = Vec::new();
    let (width, height) = image.dimensions();
    match format {
        OutputFormat::Png => PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::L8,
        )?,
        OutputFormat::Jpeg { quality } => JpegEncoder::new_with_quality(&mut bytes, quality)
            .write_image(image.as_raw(), width, height, ExtendedColorType::L8)?,
    }
    Ok(EncodedImage {
        bytes,
        content_type: format.content_type(),
    })
}
