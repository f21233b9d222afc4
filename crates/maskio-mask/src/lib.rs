#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the mask module.
pub mod error;

/// Binary mask representation and record materialization.
///
/// See [`to_masks`] for the record-to-mask thresholding rule.
pub mod mask;

/// Centroid computation over binary masks.
pub mod moments;

/// Segmentation-archive bundle loading.
///
/// Loads exported `masks`/`centroids` archives into [`SegmentationData`].
pub mod segmentation;

pub use crate::error::MaskError;
pub use crate::mask::{to_masks, Mask, MaskSize};
pub use crate::moments::{compute_centroid, Centroid};
pub use crate::segmentation::SegmentationData;
