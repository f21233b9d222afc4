#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for record decoding and archive reading.
///
/// Defines [`NpyError`] for per-record format failures and [`NpzError`]
/// for archive-level failures.
pub mod error;

/// Element type descriptors.
///
/// The [`Dtype`] and [`ByteOrder`] tags parsed from a record's `descr`
/// field.
pub mod dtype;

/// Decoded record types.
///
/// [`ArrayRecord`] pairs a shape with runtime-typed storage
/// ([`ArrayData`]).
pub mod record;

/// NPY record decoding.
///
/// See [`decode_npy`] for the strict entry point and [`DecodeOptions`] for
/// the opt-in lenient mode.
pub mod decode;

/// NPY record encoding.
///
/// Writes records back into the binary layout. See [`encode_npy`].
pub mod encode;

/// NPZ archive reading and writing.
///
/// Zip containers of NPY records with per-entry decode isolation. See
/// [`NpzArchive`].
pub mod npz;

/// High-level file reading and writing functions.
///
/// Path-based conveniences over the byte-level decode/encode entry points.
pub mod functional;

pub use crate::decode::{decode_npy, decode_npy_with_options, DecodeOptions, MAGIC};
pub use crate::dtype::{ByteOrder, Dtype};
pub use crate::encode::encode_npy;
pub use crate::error::{NpyError, NpzError};
pub use crate::npz::{write_npz_bytes, NpzArchive};
pub use crate::record::{ArrayData, ArrayRecord};
