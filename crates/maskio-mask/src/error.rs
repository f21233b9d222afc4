/// An error type for the mask module.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Only rank-2 and rank-3 records materialize into masks.
    #[error("Unsupported array rank: {0}. Only rank 2 and 3 are supported")]
    UnsupportedRank(usize),

    /// Error when the mask data does not match the mask size.
    #[error("Mask data length ({0}) does not match the mask size ({1})")]
    InvalidLength(usize, usize),

    /// Error to decode an array record.
    #[error("Failed to decode the record. {0}")]
    RecordDecode(#[from] maskio_npy::NpyError),

    /// Error to open the archive.
    #[error("Failed to open the archive. {0}")]
    Archive(#[from] maskio_npy::NpzError),
}
