//! Image processing — pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory`, forced to 8-bit RGB |
//! | **Transforms** | `image` + `imageproc`, see [`rust_backend`] |
//! | **Encode** | PNG in memory, then standard base64 |
//!
//! The module is split into:
//! - **Parameters**: Constants describing each transform
//! - **Color**: 8-bit HSV conversion used by lighten/darken/hue
//! - **Transforms**: One pure function per registry entry
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The name registry and the decode → transform → encode pipeline

pub mod backend;
pub mod codec;
mod color;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod transforms;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{
    Operation, ProcessError, ProcessedImages, UnknownOperation, lookup, process_upload,
};
pub use rust_backend::RustBackend;
