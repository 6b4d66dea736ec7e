//! Parameter types for the fixed transforms.
//!
//! These describe *what* each transform does, not *how*. The values are
//! constants: the registry is closed and nothing here is configurable at
//! runtime.
//!
//! ## Types
//!
//! - [`GaussianKernel`] — Square kernel size plus sigma (0 = derive from size).
//! - [`CannyThresholds`] — Hysteresis thresholds for edge detection.
//! - [`ValueAdjust`] — Linear scale/offset applied to the HSV value channel.

/// Gaussian smoothing kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    /// Side length of the square kernel (odd).
    pub size: u32,
    /// Standard deviation; `0.0` means "derive from `size`".
    pub sigma: f32,
}

impl GaussianKernel {
    /// Sigma actually used for the blur.
    ///
    /// When no sigma is given it is derived from the kernel size with the
    /// usual `0.3 * ((size - 1) * 0.5 - 1) + 0.8` rule, so a 15×15 kernel
    /// blurs with sigma 2.6.
    pub fn effective_sigma(self) -> f32 {
        if self.sigma > 0.0 {
            self.sigma
        } else {
            0.3 * ((self.size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        }
    }
}

/// Low/high hysteresis thresholds for Canny edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyThresholds {
    pub low: f32,
    pub high: f32,
}

/// Linear adjustment of an 8-bit channel: `alpha * v + beta`, rounded and
/// clamped to `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAdjust {
    pub alpha: f32,
    pub beta: f32,
}

impl ValueAdjust {
    pub fn apply(self, value: u8) -> u8 {
        (self.alpha * value as f32 + self.beta)
            .round()
            .clamp(0.0, 255.0) as u8
    }
}

pub const BLUR_KERNEL: GaussianKernel = GaussianKernel {
    size: 15,
    sigma: 0.0,
};

pub const EDGE_THRESHOLDS: CannyThresholds = CannyThresholds {
    low: 100.0,
    high: 200.0,
};

/// Pixels strictly above this level become 255, everything else 0.
pub const THRESHOLD_LEVEL: u8 = 127;

/// Output size of `resize`; aspect ratio is not preserved.
pub const RESIZE_TARGET: (u32, u32) = (200, 200);

/// Counter-clockwise rotation applied by `rotate`.
pub const ROTATION_DEGREES: f32 = 45.0;

pub const LIGHTEN: ValueAdjust = ValueAdjust {
    alpha: 1.2,
    beta: 50.0,
};

pub const DARKEN: ValueAdjust = ValueAdjust {
    alpha: 0.8,
    beta: -30.0,
};

/// Hue shift in 8-bit hue units (0..180, i.e. 60 degrees).
pub const HUE_SHIFT: u8 = 30;
