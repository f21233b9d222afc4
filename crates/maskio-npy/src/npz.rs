use std::io::{Cursor, Read, Write};

use crate::{
    decode::{decode_npy_with_options, DecodeOptions},
    encode::encode_npy,
    error::{NpyError, NpzError},
    record::ArrayRecord,
};

/// File extension of array-record members inside the archive.
const RECORD_EXTENSION: &str = ".npy";

/// An NPZ archive held in memory.
///
/// NPZ files are zip containers whose members are NPY records. Opening the
/// archive inflates every `.npy` member up front; other members are
/// ignored. Entry names are the member names minus the extension, the same
/// keys `np.savez` was called with.
///
/// Decoding is per entry, so one corrupt member never prevents reading its
/// siblings.
pub struct NpzArchive {
    entries: Vec<(String, Vec<u8>)>,
}

impl NpzArchive {
    /// Open an archive from raw zip bytes.
    pub fn from_bytes(src: &[u8]) -> Result<Self, NpzError> {
        let mut zip = zip::ZipArchive::new(Cursor::new(src))?;

        let mut entries = Vec::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            let name = file.name().to_string();
            let Some(stem) = name.strip_suffix(RECORD_EXTENSION) else {
                log::debug!("skipping non-record entry '{name}'");
                continue;
            };

            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)?;
            entries.push((stem.to_string(), bytes));
        }

        Ok(Self { entries })
    }

    /// Number of array-record entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive holds no array-record entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in archive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Raw bytes of one entry, if present.
    pub fn entry_bytes(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    /// Decode the named entry.
    pub fn decode(&self, name: &str, options: &DecodeOptions) -> Result<ArrayRecord, NpzError> {
        let bytes = self
            .entry_bytes(name)
            .ok_or_else(|| NpzError::MissingEntry(name.to_string()))?;
        Ok(decode_npy_with_options(bytes, options)?)
    }

    /// Decode every entry, keeping per-entry failures separate.
    ///
    /// Returns one `(name, result)` pair per entry in archive order.
    pub fn decode_all(
        &self,
        options: &DecodeOptions,
    ) -> Vec<(String, Result<ArrayRecord, NpyError>)> {
        self.entries
            .iter()
            .map(|(name, bytes)| (name.clone(), decode_npy_with_options(bytes, options)))
            .collect()
    }
}

/// Write records into NPZ zip bytes.
///
/// Members are stored uncompressed under `<name>.npy`, the layout
/// `np.savez` produces.
pub fn write_npz_bytes(records: &[(&str, &ArrayRecord)]) -> Result<Vec<u8>, NpzError> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);

    for (name, record) in records {
        zip.start_file(format!("{name}{RECORD_EXTENSION}"), options)?;
        zip.write_all(&encode_npy(record)?)?;
    }

    Ok(zip.finish()?.into_inner())
}
