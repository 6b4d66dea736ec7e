//! The registry transforms.
//!
//! Each function is a thin wrapper around one `image` / `imageproc` call,
//! with the constants from [`params`](super::params). They are pure: the
//! input buffer is borrowed and a new buffer is returned.

use super::backend::BackendError;
use super::color::{HUE_RANGE, hsv_to_rgb, luma_bt601, rgb_to_hsv};
use super::operations::Operation;
use super::params::{
    BLUR_KERNEL, DARKEN, EDGE_THRESHOLDS, HUE_SHIFT, LIGHTEN, RESIZE_TARGET, ROTATION_DEGREES,
    THRESHOLD_LEVEL, ValueAdjust,
};
use image::imageops::FilterType;
use image::{DynamicImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{ThresholdType, threshold as binary_threshold};
use imageproc::geometric_transformations::{Interpolation, rotate as rotate_about};

/// Signature shared by every registry entry.
pub type Transform = fn(&DynamicImage) -> Result<DynamicImage, BackendError>;

pub fn grayscale(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    Ok(DynamicImage::ImageLuma8(luma_bt601(img)))
}

pub fn blur(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    let sigma = BLUR_KERNEL.effective_sigma();
    Ok(match img {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(imageproc::filter::gaussian_blur_f32(gray, sigma))
        }
        other => DynamicImage::ImageRgb8(imageproc::filter::gaussian_blur_f32(
            &other.to_rgb8(),
            sigma,
        )),
    })
}

pub fn edge(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    let gray = luma_bt601(img);
    let edges = imageproc::edges::canny(&gray, EDGE_THRESHOLDS.low, EDGE_THRESHOLDS.high);
    Ok(DynamicImage::ImageLuma8(edges))
}

pub fn threshold(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    let gray = luma_bt601(img);
    Ok(DynamicImage::ImageLuma8(binary_threshold(
        &gray,
        THRESHOLD_LEVEL,
        ThresholdType::Binary,
    )))
}

pub fn resize(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    let (width, height) = RESIZE_TARGET;
    Ok(img.resize_exact(width, height, FilterType::Triangle))
}

/// Rotate counter-clockwise about the (integer) image center, keeping the
/// canvas size. Corners that leave the canvas are clipped and uncovered
/// areas are filled with black.
pub fn rotate(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    let center = ((img.width() / 2) as f32, (img.height() / 2) as f32);
    // imageproc rotates clockwise for positive angles
    let theta = -ROTATION_DEGREES.to_radians();
    Ok(match img {
        DynamicImage::ImageLuma8(gray) => DynamicImage::ImageLuma8(rotate_about(
            gray,
            center,
            theta,
            Interpolation::Bilinear,
            Luma([0]),
        )),
        other => DynamicImage::ImageRgb8(rotate_about(
            &other.to_rgb8(),
            center,
            theta,
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        )),
    })
}

pub fn flip(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    Ok(img.fliph())
}

pub fn lighten(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    adjust_value(Operation::Lighten, img, LIGHTEN)
}

pub fn darken(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    adjust_value(Operation::Darken, img, DARKEN)
}

/// Shift hue by a fixed amount. Single-channel input is expanded to RGB
/// first, so a gray image comes back as a (still gray) 3-channel image.
pub fn hue(img: &DynamicImage) -> Result<DynamicImage, BackendError> {
    let rgb = img.to_rgb8();
    Ok(DynamicImage::ImageRgb8(map_hsv(&rgb, |[h, s, v]| {
        [(h + HUE_SHIFT) % HUE_RANGE, s, v]
    })))
}

/// Scale the HSV value channel. Only 3-channel buffers are accepted; there
/// is no implicit gray expansion here.
fn adjust_value(
    operation: Operation,
    img: &DynamicImage,
    adjust: ValueAdjust,
) -> Result<DynamicImage, BackendError> {
    let DynamicImage::ImageRgb8(rgb) = img else {
        return Err(BackendError::UnsupportedChannels {
            operation,
            expected: 3,
            actual: img.color().channel_count(),
        });
    };
    Ok(DynamicImage::ImageRgb8(map_hsv(rgb, |[h, s, v]| {
        [h, s, adjust.apply(v)]
    })))
}

fn map_hsv(rgb: &RgbImage, f: impl Fn([u8; 3]) -> [u8; 3]) -> RgbImage {
    let mut out = rgb.clone();
    for pixel in out.pixels_mut() {
        *pixel = hsv_to_rgb(f(rgb_to_hsv(*pixel)));
    }
    out
}
