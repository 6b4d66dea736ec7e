//! Color conversions the `image`/`imageproc` stack does not provide.
//!
//! - 8-bit HSV in the packed layout common to vision libraries: hue is
//!   stored in half-degrees (`0..180`) so it fits a byte, saturation and
//!   value span `0..=255`. Neither crate has an HSV color type, so the
//!   per-pixel formulas live here.
//! - BT.601 luminance. `image`'s own luma conversion uses Rec. 709 weights,
//!   which moves saturated greens and reds across the threshold level.

use image::{DynamicImage, GrayImage, Rgb};

/// Number of distinct 8-bit hue values (one per two degrees).
pub const HUE_RANGE: u8 = 180;

/// Convert an RGB pixel to packed `[h, s, v]`.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

    let degrees = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

    // 359° rounds up to 180, which is the same hue as 0
    let h = (degrees / 2.0).round() as u16 % HUE_RANGE as u16;

    [h as u8, s.round() as u8, max as u8]
}

/// Convert packed `[h, s, v]` back to an RGB pixel.
pub fn hsv_to_rgb([h, s, v]: [u8; 3]) -> Rgb<u8> {
    let degrees = (h % HUE_RANGE) as f32 * 2.0;
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;

    let c = v * s;
    let x = c * (1.0 - ((degrees / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if degrees < 60.0 {
        (c, x, 0.0)
    } else if degrees < 120.0 {
        (x, c, 0.0)
    } else if degrees < 180.0 {
        (0.0, c, x)
    } else if degrees < 240.0 {
        (0.0, x, c)
    } else if degrees < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let to_byte = |channel: f32| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_byte(r), to_byte(g), to_byte(b)])
}

/// Single-channel luminance with BT.601 weights
/// (`0.299 R + 0.587 G + 0.114 B`, rounded). Gray input is returned as-is.
pub fn luma_bt601(img: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0.map(u32::from);
        image::Luma([((299 * r + 587 * g + 114 * b + 500) / 1000) as u8])
    })
}
