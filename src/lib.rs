//! # imgop
//!
//! A small HTTP service that applies one fixed image transform to an
//! uploaded picture and returns both the original and the result as
//! base64-encoded PNG.
//!
//! # Request Flow
//!
//! ```text
//! multipart upload  →  decode (8-bit RGB)  →  transform  →  PNG + base64 ×2
//! ```
//!
//! Every buffer is request-scoped. Nothing is shared between requests apart
//! from the immutable operation registry, so concurrent requests need no
//! coordination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Operation registry, transforms, backend trait, PNG/base64 codec |
//! | [`server`] | axum router for `POST /process`, CORS, error → status mapping |
//! | [`config`] | TOML config loading, merging over defaults, validation |
//!
//! # Operations
//!
//! | Name | Effect |
//! |------|--------|
//! | `grayscale` | single-channel BT.601 luminance |
//! | `blur` | Gaussian, 15×15 kernel, sigma derived from size |
//! | `edge` | Canny on luminance, thresholds 100/200 |
//! | `threshold` | luminance > 127 → 255, else 0 |
//! | `resize` | exactly 200×200, aspect ignored |
//! | `rotate` | 45° counter-clockwise about the center, same canvas |
//! | `flip` | horizontal mirror |
//! | `lighten` | HSV value × 1.2 + 50 |
//! | `darken` | HSV value × 0.8 − 30 |
//! | `hue` | HSV hue + 30 (of 180) |
//!
//! # Failure Semantics
//!
//! Undecodable uploads and unknown operation names are client errors (400
//! with an `error` field). A transform that fails on an unexpected buffer
//! shape is not treated as a client error: it is logged and answered with a
//! plain 500.

pub mod config;
pub mod imaging;
pub mod server;
