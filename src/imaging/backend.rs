//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three steps every request goes
//! through: decode the upload, apply one registry transform, encode a buffer
//! as PNG.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! and `imageproc` crates.

use super::operations::Operation;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("{operation} needs a {expected}-channel image, got {actual} channel(s)")]
    UnsupportedChannels {
        operation: Operation,
        expected: u8,
        actual: u8,
    },
}

/// Width and height of a decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(img: &DynamicImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
        }
    }
}

/// Trait for image processing backends.
///
/// Everything above this trait ([`process_upload`](super::operations::process_upload),
/// the HTTP handler, the CLI) is backend-agnostic.
pub trait ImageBackend: Send + Sync {
    /// Decode an uploaded container (PNG, JPEG, ...) into a 3-channel buffer.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError>;

    /// Apply one registry transform.
    fn apply(&self, operation: Operation, img: &DynamicImage)
    -> Result<DynamicImage, BackendError>;

    /// Encode a buffer as PNG.
    fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, BackendError>;
}
