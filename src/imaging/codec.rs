//! In-memory PNG and base64 helpers.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as Base64;
use image::{DynamicImage, ImageFormat, ImageResult};
use std::io::Cursor;

/// Encode a buffer as PNG. Gray buffers stay single-channel in the file.
pub fn encode_png(img: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn to_base64(bytes: &[u8]) -> String {
    Base64.encode(bytes)
}

pub fn from_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    Base64.decode(text)
}
