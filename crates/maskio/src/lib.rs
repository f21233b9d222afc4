#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Re-exports the member crates: [`npy`] reads and writes NPY records and
//! NPZ archives, [`mask`] materializes binary masks and centroids from the
//! decoded records.

#[doc(inline)]
pub use maskio_npy as npy;

#[doc(inline)]
pub use maskio_mask as mask;
