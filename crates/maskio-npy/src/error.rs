/// An error type for decoding single NPY array records.
#[derive(thiserror::Error, Debug)]
pub enum NpyError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// The record does not start with the NPY magic bytes.
    #[error("Invalid magic bytes at the start of the record")]
    BadMagic,

    /// The format version byte is not 1 or 2.
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u8),

    /// The declared header length runs past the end of the buffer.
    #[error("Declared header length {declared} exceeds the {available} bytes available")]
    TruncatedHeader {
        /// Header length declared in the record.
        declared: usize,
        /// Bytes remaining after the length field.
        available: usize,
    },

    /// The header dict is not valid or misses a required field.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The `descr` field names an element type we do not support.
    #[error("Unsupported element type descriptor: {0}")]
    UnsupportedDtype(String),

    /// The data segment is shorter than the shape and dtype imply.
    #[error("Data segment holds {available} bytes, expected {expected}")]
    InsufficientData {
        /// Bytes implied by `product(shape) * byte_width`.
        expected: usize,
        /// Bytes actually present after the header.
        available: usize,
    },
}

/// An error type for reading NPZ archives.
#[derive(thiserror::Error, Debug)]
pub enum NpzError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// The bytes are not a valid zip container.
    #[error("Failed to read the zip container. {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The archive holds no entry with the requested name.
    #[error("No entry named '{0}' in the archive")]
    MissingEntry(String),

    /// A single entry failed to decode.
    #[error("Failed to decode the record. {0}")]
    Record(#[from] NpyError),
}
