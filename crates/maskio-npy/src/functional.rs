use std::path::Path;

use crate::{
    decode::{decode_npy_with_options, DecodeOptions},
    encode::encode_npy,
    error::{NpyError, NpzError},
    npz::NpzArchive,
    record::ArrayRecord,
};

/// Reads an NPY record from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the `.npy` file.
///
/// # Returns
///
/// The decoded array record.
pub fn read_npy(file_path: impl AsRef<Path>) -> Result<ArrayRecord, NpyError> {
    read_npy_with_options(file_path, &DecodeOptions::default())
}

/// Reads an NPY record from the given file path with decode options.
///
/// # Arguments
///
/// * `file_path` - The path to the `.npy` file.
/// * `options` - Decode options, e.g. lenient short-data handling.
pub fn read_npy_with_options(
    file_path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<ArrayRecord, NpyError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(NpyError::FileDoesNotExist(file_path.to_path_buf()));
    }
    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("npy"))
    {
        return Err(NpyError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    decode_npy_with_options(&bytes, options)
}

/// Writes the given record to the given file path in the NPY layout.
///
/// # Arguments
///
/// * `file_path` - The path to the `.npy` file.
/// * `record` - The record to encode.
pub fn write_npy(file_path: impl AsRef<Path>, record: &ArrayRecord) -> Result<(), NpyError> {
    let bytes = encode_npy(record)?;
    std::fs::write(file_path, bytes)?;
    Ok(())
}

/// Reads an NPZ archive from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the `.npz` file.
///
/// # Returns
///
/// The opened archive with its entries resident in memory.
pub fn read_npz(file_path: impl AsRef<Path>) -> Result<NpzArchive, NpzError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(NpzError::FileDoesNotExist(file_path.to_path_buf()));
    }
    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("npz"))
    {
        return Err(NpzError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    NpzArchive::from_bytes(&bytes)
}

/// Writes records to the given file path as an NPZ archive.
///
/// # Arguments
///
/// * `file_path` - The path to the `.npz` file.
/// * `records` - Named records to store, in order.
pub fn write_npz(
    file_path: impl AsRef<Path>,
    records: &[(&str, &ArrayRecord)],
) -> Result<(), NpzError> {
    let bytes = crate::npz::write_npz_bytes(records)?;
    std::fs::write(file_path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ArrayData;

    #[test]
    fn read_write_npy() -> Result<(), NpyError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("values.npy");

        let record = ArrayRecord::new(vec![3], ArrayData::I16(vec![-1, 0, 1]));
        write_npy(&file_path, &record)?;
        assert!(file_path.exists(), "File does not exist: {file_path:?}");

        let record_back = read_npy(&file_path)?;
        assert_eq!(record_back, record);
        Ok(())
    }

    #[test]
    fn read_npy_checks_path() {
        assert!(matches!(
            read_npy("/tmp/does-not-exist.npy"),
            Err(NpyError::FileDoesNotExist(_))
        ));
    }

    #[test]
    fn read_npy_checks_extension() -> Result<(), NpyError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("values.bin");
        std::fs::write(&file_path, b"whatever")?;

        assert!(matches!(
            read_npy(&file_path),
            Err(NpyError::InvalidFileExtension(_))
        ));
        Ok(())
    }

    #[test]
    fn read_write_npz() -> Result<(), NpzError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("bundle.npz");

        let record = ArrayRecord::new(vec![2], ArrayData::F64(vec![0.5, -0.5]));
        write_npz(&file_path, &[("values", &record)])?;

        let archive = read_npz(&file_path)?;
        assert_eq!(archive.decode("values", &DecodeOptions::default())?, record);
        Ok(())
    }
}
