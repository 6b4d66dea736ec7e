//! The operation registry and the per-request pipeline.
//!
//! [`Operation`] names the closed set of transforms. The name → operation
//! map is built once and never mutated; [`process_upload`] combines it with
//! an [`ImageBackend`] to turn an upload into the response pair.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::codec::to_base64;
use super::transforms::{self, Transform};
use image::DynamicImage;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// One of the fixed registry transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Grayscale,
    Blur,
    Edge,
    Threshold,
    Resize,
    Rotate,
    Flip,
    Lighten,
    Darken,
    Hue,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Grayscale,
        Operation::Blur,
        Operation::Edge,
        Operation::Threshold,
        Operation::Resize,
        Operation::Rotate,
        Operation::Flip,
        Operation::Lighten,
        Operation::Darken,
        Operation::Hue,
    ];

    /// Wire name, as sent in the `operation` form field.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Blur => "blur",
            Operation::Edge => "edge",
            Operation::Threshold => "threshold",
            Operation::Resize => "resize",
            Operation::Rotate => "rotate",
            Operation::Flip => "flip",
            Operation::Lighten => "lighten",
            Operation::Darken => "darken",
            Operation::Hue => "hue",
        }
    }

    pub fn transform(self) -> Transform {
        match self {
            Operation::Grayscale => transforms::grayscale,
            Operation::Blur => transforms::blur,
            Operation::Edge => transforms::edge,
            Operation::Threshold => transforms::threshold,
            Operation::Resize => transforms::resize,
            Operation::Rotate => transforms::rotate,
            Operation::Flip => transforms::flip,
            Operation::Lighten => transforms::lighten,
            Operation::Darken => transforms::darken,
            Operation::Hue => transforms::hue,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static REGISTRY: LazyLock<HashMap<&'static str, Operation>> =
    LazyLock::new(|| Operation::ALL.iter().map(|op| (op.name(), *op)).collect());

/// Exact, case-sensitive lookup of a registry name.
pub fn lookup(name: &str) -> Option<Operation> {
    REGISTRY.get(name).copied()
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown operation")]
pub struct UnknownOperation;

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s).ok_or(UnknownOperation)
    }
}

/// Failures of a single upload. The `Display` text of the first two
/// variants is exactly what clients see in the `error` field.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Invalid image")]
    InvalidImage(#[source] BackendError),
    #[error("Unknown operation")]
    UnknownOperation,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Response pair: both buffers as base64-encoded PNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedImages {
    pub original_image: String,
    pub processed_image: String,
}

/// Decode `bytes`, apply the operation called `name`, and encode both the
/// decoded original and the result.
///
/// Decoding runs before the name is checked, so garbage input with an
/// unknown name reports [`ProcessError::InvalidImage`].
pub fn process_upload(
    backend: &impl ImageBackend,
    bytes: &[u8],
    name: &str,
) -> Result<ProcessedImages, ProcessError> {
    let original = backend.decode(bytes).map_err(ProcessError::InvalidImage)?;
    let operation = lookup(name).ok_or(ProcessError::UnknownOperation)?;

    let processed = backend.apply(operation, &original)?;
    tracing::debug!(
        %operation,
        input = ?Dimensions::of(&original),
        output = ?Dimensions::of(&processed),
        "transform applied"
    );

    Ok(ProcessedImages {
        original_image: encode(backend, &original)?,
        processed_image: encode(backend, &processed)?,
    })
}

fn encode(backend: &impl ImageBackend, img: &DynamicImage) -> Result<String, BackendError> {
    Ok(to_base64(&backend.encode_png(img)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn every_operation_round_trips_through_its_name() {
        for op in Operation::ALL {
            assert_eq!(lookup(op.name()), Some(op));
            assert_eq!(op.name().parse::<Operation>(), Ok(op));
            assert_eq!(op.to_string(), op.name());
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(lookup("Grayscale"), None);
        assert_eq!(lookup("BLUR"), None);
        assert_eq!(lookup(" blur"), None);
        assert_eq!(lookup("gray"), None);
        assert_eq!(lookup(""), None);
        assert_eq!("nonexistent".parse::<Operation>(), Err(UnknownOperation));
    }

    #[test]
    fn registry_has_no_duplicate_names() {
        assert_eq!(REGISTRY.len(), Operation::ALL.len());
    }

    #[test]
    fn process_upload_runs_decode_apply_encode() {
        let backend = MockBackend::decoding_to(64, 48);

        let result = process_upload(&backend, b"fake", "flip").unwrap();
        assert_eq!(result.original_image, "iVBORw==");
        assert_eq!(result.processed_image, "iVBORw==");

        let dims = Dimensions {
            width: 64,
            height: 48,
        };
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Decode(4),
                RecordedOp::Apply(Operation::Flip),
                RecordedOp::EncodePng(dims),
                RecordedOp::EncodePng(dims),
            ]
        );
    }

    #[test]
    fn process_upload_rejects_unknown_name_after_decoding() {
        let backend = MockBackend::decoding_to(8, 8);

        let err = process_upload(&backend, b"fake", "nonexistent").unwrap_err();
        assert!(matches!(err, ProcessError::UnknownOperation));
        assert_eq!(err.to_string(), "Unknown operation");
        assert_eq!(backend.get_operations(), vec![RecordedOp::Decode(4)]);
    }

    #[test]
    fn invalid_image_wins_over_unknown_name() {
        let backend = MockBackend::rejecting_input();

        let err = process_upload(&backend, b"garbage", "nonexistent").unwrap_err();
        assert!(matches!(err, ProcessError::InvalidImage(_)));
        assert_eq!(err.to_string(), "Invalid image");
    }
}
