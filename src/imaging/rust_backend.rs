//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP, TIFF, BMP, GIF) | `image::load_from_memory` |
//! | Grayscale, resize, flip | `image::DynamicImage` methods |
//! | Blur | `imageproc::filter::gaussian_blur_f32` |
//! | Edge | `imageproc::edges::canny` |
//! | Threshold | `imageproc::contrast::threshold` |
//! | Rotate | `imageproc::geometric_transformations::rotate` |
//! | Lighten, darken, hue | 8-bit HSV in [`color`](super::color) |
//! | Encode → PNG | `image::ImageFormat::Png` |

use super::backend::{BackendError, ImageBackend};
use super::codec;
use super::operations::Operation;
use image::DynamicImage;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    /// The container format is sniffed from the bytes. The result is always
    /// 8-bit RGB: alpha is dropped and gray inputs are expanded.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        let img = image::load_from_memory(bytes).map_err(BackendError::Decode)?;
        Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
    }

    fn apply(
        &self,
        operation: Operation,
        img: &DynamicImage,
    ) -> Result<DynamicImage, BackendError> {
        (operation.transform())(img)
    }

    fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, BackendError> {
        codec::encode_png(img).map_err(BackendError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::operations::process_upload;
    use crate::imaging::{Dimensions, ProcessError};
    use image::{ColorType, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encoded(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn test_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        encoded(DynamicImage::ImageRgb8(img), ImageFormat::Png)
    }

    fn decode_field(text: &str) -> DynamicImage {
        image::load_from_memory(&codec::from_base64(text).unwrap()).unwrap()
    }

    #[test]
    fn decode_png_to_rgb() {
        let img = RustBackend::new().decode(&test_png(30, 20)).unwrap();
        assert_eq!(img.color(), ColorType::Rgb8);
        assert_eq!(Dimensions::of(&img), Dimensions { width: 30, height: 20 });
    }

    #[test]
    fn decode_jpeg() {
        let bytes = encoded(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 12, Rgb([10, 200, 30]))),
            ImageFormat::Jpeg,
        );
        let img = RustBackend::new().decode(&bytes).unwrap();
        assert_eq!(img.color(), ColorType::Rgb8);
        assert_eq!((img.width(), img.height()), (16, 12));
    }

    #[test]
    fn decode_drops_alpha_and_expands_gray() {
        let backend = RustBackend::new();
        let rgba = encoded(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 0]))),
            ImageFormat::Png,
        );
        let gray = encoded(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([50]))),
            ImageFormat::Png,
        );

        let from_rgba = backend.decode(&rgba).unwrap();
        assert_eq!(from_rgba.color(), ColorType::Rgb8);
        assert_eq!(from_rgba.to_rgb8().get_pixel(0, 0), &Rgb([9, 8, 7]));

        let from_gray = backend.decode(&gray).unwrap();
        assert_eq!(from_gray.color(), ColorType::Rgb8);
        assert_eq!(from_gray.to_rgb8().get_pixel(2, 2), &Rgb([50, 50, 50]));
    }

    #[test]
    fn decode_rejects_non_images() {
        let backend = RustBackend::new();
        assert!(matches!(backend.decode(b""), Err(BackendError::Decode(_))));
        assert!(matches!(
            backend.decode(b"definitely not an image"),
            Err(BackendError::Decode(_))
        ));
        // valid signature, truncated body
        let mut truncated = test_png(10, 10);
        truncated.truncate(20);
        assert!(backend.decode(&truncated).is_err());
    }

    #[test]
    fn every_operation_produces_decodable_pair() {
        let backend = RustBackend::new();
        let input = test_png(48, 32);

        for op in Operation::ALL {
            let result = process_upload(&backend, &input, op.name())
                .unwrap_or_else(|e| panic!("{op} failed: {e}"));
            let original = decode_field(&result.original_image);
            assert_eq!((original.width(), original.height()), (48, 32), "{op}");
            decode_field(&result.processed_image);
        }
    }

    #[test]
    fn grayscale_response_is_single_channel() {
        let result = process_upload(&RustBackend::new(), &test_png(20, 20), "grayscale").unwrap();
        assert_eq!(decode_field(&result.processed_image).color(), ColorType::L8);
    }

    #[test]
    fn resize_response_is_200_square() {
        for (w, h) in [(640, 120), (12, 300), (200, 200)] {
            let result = process_upload(&RustBackend::new(), &test_png(w, h), "resize").unwrap();
            let processed = decode_field(&result.processed_image);
            assert_eq!((processed.width(), processed.height()), (200, 200));
        }
    }

    #[test]
    fn hue_on_gray_upload_returns_color_buffer() {
        let gray = encoded(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([120]))),
            ImageFormat::Png,
        );
        let result = process_upload(&RustBackend::new(), &gray, "hue").unwrap();
        assert_eq!(decode_field(&result.processed_image).color(), ColorType::Rgb8);
    }

    #[test]
    fn garbage_is_invalid_image() {
        let err = process_upload(&RustBackend::new(), &[0xde, 0xad, 0xbe, 0xef], "blur").unwrap_err();
        assert!(matches!(err, ProcessError::InvalidImage(_)));
    }
}
