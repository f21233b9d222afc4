use maskio_npy::{ArrayData, ArrayRecord};

use crate::error::MaskError;

/// Mask size in pixels
///
/// A struct to represent the size of a mask in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskSize {
    /// Width of the mask in pixels
    pub width: usize,
    /// Height of the mask in pixels
    pub height: usize,
}

impl std::fmt::Display for MaskSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "MaskSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for MaskSize {
    fn from(size: [usize; 2]) -> Self {
        MaskSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A binary pixel grid marking a detected region.
///
/// Pixels are stored row-major; `true` marks a pixel belonging to the
/// region. A mask owns its storage independently of the record it was
/// materialized from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    size: MaskSize,
    data: Vec<bool>,
}

impl Mask {
    /// Create a new mask from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the mask in pixels.
    /// * `data` - Row-major pixel flags of length `width * height`.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the mask size, an
    /// error is returned.
    pub fn new(size: MaskSize, data: Vec<bool>) -> Result<Self, MaskError> {
        if data.len() != size.width * size.height {
            return Err(MaskError::InvalidLength(
                data.len(),
                size.width * size.height,
            ));
        }
        Ok(Self { size, data })
    }

    /// The size of the mask in pixels.
    pub fn size(&self) -> MaskSize {
        self.size
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Row-major pixel flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// The pixel at `(row, col)`, or `None` out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.size.height || col >= self.size.width {
            return None;
        }
        Some(self.data[row * self.size.width + col])
    }

    /// Number of `true` pixels.
    pub fn num_true(&self) -> usize {
        self.data.iter().filter(|&&p| p).count()
    }
}

/// Materialize binary masks from a decoded record.
///
/// A rank-2 record of shape `(H, W)` yields one mask; a rank-3 record of
/// shape `(N, H, W)` yields one mask per leading-dimension slice. A pixel
/// is `true` iff its decoded value is greater than zero. Any other rank
/// fails with [`MaskError::UnsupportedRank`].
pub fn to_masks(record: &ArrayRecord) -> Result<Vec<Mask>, MaskError> {
    let (count, size) = match record.shape.as_slice() {
        [h, w] => (1, MaskSize {
            width: *w,
            height: *h,
        }),
        [n, h, w] => (*n, MaskSize {
            width: *w,
            height: *h,
        }),
        other => return Err(MaskError::UnsupportedRank(other.len())),
    };

    let flags = positive_flags(&record.data);
    let plane = size.width * size.height;
    if flags.len() != count * plane {
        return Err(MaskError::InvalidLength(flags.len(), count * plane));
    }

    (0..count)
        .map(|n| Mask::new(size, flags[n * plane..(n + 1) * plane].to_vec()))
        .collect()
}

/// Threshold every element with the `value > 0` rule.
fn positive_flags(data: &ArrayData) -> Vec<bool> {
    match data {
        ArrayData::Bool(v) => v.clone(),
        ArrayData::U8(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::U16(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::U32(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::U64(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::I8(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::I16(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::I32(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::I64(v) => v.iter().map(|&x| x > 0).collect(),
        ArrayData::F32(v) => v.iter().map(|&x| x > 0.0).collect(),
        ArrayData::F64(v) => v.iter().map(|&x| x > 0.0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_from_rank2_record() -> Result<(), MaskError> {
        let record = ArrayRecord::new(vec![2, 2], ArrayData::I32(vec![0, 1, -1, 5]));
        let masks = to_masks(&record)?;
        assert_eq!(masks.len(), 1);

        let mask = &masks[0];
        assert_eq!(mask.get(0, 0), Some(false));
        assert_eq!(mask.get(0, 1), Some(true));
        assert_eq!(mask.get(1, 0), Some(false));
        assert_eq!(mask.get(1, 1), Some(true));
        Ok(())
    }

    #[test]
    fn masks_from_rank3_record() -> Result<(), MaskError> {
        let record = ArrayRecord::new(
            vec![2, 2, 2],
            ArrayData::U8(vec![0, 1, 1, 0, 1, 1, 0, 0]),
        );
        let masks = to_masks(&record)?;
        assert_eq!(masks.len(), 2);

        assert_eq!(masks[0].as_slice(), &[false, true, true, false]);
        assert_eq!(masks[1].as_slice(), &[true, true, false, false]);
        Ok(())
    }

    #[test]
    fn masks_reject_other_ranks() {
        let scalar = ArrayRecord::new(vec![], ArrayData::U8(vec![1]));
        assert!(matches!(
            to_masks(&scalar),
            Err(MaskError::UnsupportedRank(0))
        ));

        let rank4 = ArrayRecord::new(vec![1, 1, 1, 1], ArrayData::U8(vec![1]));
        assert!(matches!(
            to_masks(&rank4),
            Err(MaskError::UnsupportedRank(4))
        ));
    }

    #[test]
    fn float_threshold_is_strictly_positive() -> Result<(), MaskError> {
        let record = ArrayRecord::new(vec![1, 4], ArrayData::F32(vec![-0.5, 0.0, 0.001, 1.0]));
        let masks = to_masks(&record)?;
        assert_eq!(masks[0].as_slice(), &[false, false, true, true]);
        Ok(())
    }

    #[test]
    fn mask_new_checks_length() {
        let result = Mask::new([4, 4].into(), vec![false; 3]);
        assert!(matches!(result, Err(MaskError::InvalidLength(3, 16))));
    }

    #[test]
    fn mask_accessors() -> Result<(), MaskError> {
        let mask = Mask::new([3, 2].into(), vec![true, false, true, false, false, true])?;
        assert_eq!(mask.cols(), 3);
        assert_eq!(mask.rows(), 2);
        assert_eq!(mask.num_true(), 3);
        assert_eq!(mask.get(2, 0), None);
        assert_eq!(mask.get(1, 2), Some(true));
        Ok(())
    }
}
