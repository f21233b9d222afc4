use std::path::Path;

use maskio_npy::{functional::read_npz, ArrayRecord, DecodeOptions, NpzArchive};

use crate::{
    error::MaskError,
    mask::{to_masks, Mask},
    moments::{compute_centroid, Centroid},
};

/// Entry name of the mask stack inside a segmentation archive.
const MASKS_ENTRY: &str = "masks";
/// Entry name of the optional precomputed centroids.
const CENTROIDS_ENTRY: &str = "centroids";

/// Masks and centroids loaded from a segmentation archive.
///
/// A segmentation exporter saves an archive with a `masks` entry of shape
/// `(N, H, W)` or `(H, W)` and, optionally, a `centroids` entry of shape
/// `(N, 2)` holding `(x, y)` pairs. When the centroid entry is absent or
/// unusable the centroids are computed from the masks instead, so
/// `centroids[i]` always corresponds to `masks[i]` except for masks with
/// no set pixels, which contribute no centroid.
#[derive(Clone, Debug)]
pub struct SegmentationData {
    /// One binary mask per detected object.
    pub masks: Vec<Mask>,
    /// One centroid per non-empty mask.
    pub centroids: Vec<Centroid>,
}

impl SegmentationData {
    /// Load a segmentation bundle from raw archive bytes.
    pub fn from_npz_bytes(src: &[u8]) -> Result<Self, MaskError> {
        let archive = NpzArchive::from_bytes(src)?;
        Self::from_archive(&archive)
    }

    /// Load a segmentation bundle from an `.npz` file path.
    pub fn from_npz_file(file_path: impl AsRef<Path>) -> Result<Self, MaskError> {
        let archive = read_npz(file_path)?;
        Self::from_archive(&archive)
    }

    /// Load a segmentation bundle from an already opened archive.
    pub fn from_archive(archive: &NpzArchive) -> Result<Self, MaskError> {
        let options = DecodeOptions::default();

        let record = archive.decode(MASKS_ENTRY, &options)?;
        let masks = to_masks(&record)?;

        let centroids = match archive.decode(CENTROIDS_ENTRY, &options) {
            Ok(record) => match read_centroids(&record) {
                Some(centroids) => centroids,
                None => {
                    log::warn!(
                        "unexpected centroid shape {:?}, computing from masks",
                        record.shape
                    );
                    centroids_from_masks(&masks)
                }
            },
            Err(maskio_npy::NpzError::MissingEntry(_)) => centroids_from_masks(&masks),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { masks, centroids })
    }
}

/// Read a `(N, 2)` record of `(x, y)` pairs, or `None` if the shape does
/// not match.
fn read_centroids(record: &ArrayRecord) -> Option<Vec<Centroid>> {
    match record.shape.as_slice() {
        [n, 2] => {
            let mut centroids = Vec::with_capacity(*n);
            for i in 0..*n {
                centroids.push(Centroid {
                    x: record.data.as_f64(i * 2)?,
                    y: record.data.as_f64(i * 2 + 1)?,
                });
            }
            Some(centroids)
        }
        _ => None,
    }
}

fn centroids_from_masks(masks: &[Mask]) -> Vec<Centroid> {
    masks.iter().filter_map(compute_centroid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskio_npy::{write_npz_bytes, ArrayData};

    /// Two 8x8 masks with single set pixels at (2, 3) and (5, 1).
    fn mask_record() -> ArrayRecord {
        let mut data = vec![0u8; 2 * 8 * 8];
        data[2 * 8 + 3] = 1;
        data[64 + 5 * 8 + 1] = 1;
        ArrayRecord::new(vec![2, 8, 8], ArrayData::U8(data))
    }

    #[test]
    fn bundle_with_precomputed_centroids() -> Result<(), MaskError> {
        let masks = mask_record();
        let centroids = ArrayRecord::new(vec![2, 2], ArrayData::F32(vec![150.0, 140.0, 350.0, 360.0]));
        let bytes = write_npz_bytes(&[("masks", &masks), ("centroids", &centroids)])
            .map_err(MaskError::Archive)?;

        let data = SegmentationData::from_npz_bytes(&bytes)?;
        assert_eq!(data.masks.len(), 2);
        assert_eq!(data.centroids.len(), 2);
        assert_eq!(data.centroids[0], Centroid { x: 150.0, y: 140.0 });
        assert_eq!(data.centroids[1], Centroid { x: 350.0, y: 360.0 });
        Ok(())
    }

    #[test]
    fn bundle_computes_missing_centroids() -> Result<(), MaskError> {
        let masks = mask_record();
        let bytes = write_npz_bytes(&[("masks", &masks)]).map_err(MaskError::Archive)?;

        let data = SegmentationData::from_npz_bytes(&bytes)?;
        assert_eq!(data.centroids.len(), 2);
        assert_eq!(data.centroids[0], Centroid { x: 3.0, y: 2.0 });
        assert_eq!(data.centroids[1], Centroid { x: 1.0, y: 5.0 });
        Ok(())
    }

    #[test]
    fn bundle_ignores_misshapen_centroids() -> Result<(), MaskError> {
        let masks = mask_record();
        let centroids = ArrayRecord::new(vec![4], ArrayData::F32(vec![1.0, 2.0, 3.0, 4.0]));
        let bytes = write_npz_bytes(&[("masks", &masks), ("centroids", &centroids)])
            .map_err(MaskError::Archive)?;

        let data = SegmentationData::from_npz_bytes(&bytes)?;
        // falls back to mask-derived centroids
        assert_eq!(data.centroids[0], Centroid { x: 3.0, y: 2.0 });
        Ok(())
    }

    #[test]
    fn bundle_requires_masks_entry() -> Result<(), MaskError> {
        let centroids = ArrayRecord::new(vec![1, 2], ArrayData::F32(vec![1.0, 2.0]));
        let bytes = write_npz_bytes(&[("centroids", &centroids)]).map_err(MaskError::Archive)?;

        assert!(matches!(
            SegmentationData::from_npz_bytes(&bytes),
            Err(MaskError::Archive(maskio_npy::NpzError::MissingEntry(_)))
        ));
        Ok(())
    }
}
