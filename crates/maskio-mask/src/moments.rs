use crate::mask::Mask;

/// The mean position of a mask's true pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    /// Column coordinate of the center of mass.
    pub x: f64,
    /// Row coordinate of the center of mass.
    pub y: f64,
}

/// Compute the centroid of a mask, or `None` when no pixel is set.
///
/// Unweighted first moments over the binary grid: every `true` pixel
/// contributes weight one, so the centroid is `(m10 / m00, m01 / m00)`
/// with x along columns and y along rows.
pub fn compute_centroid(mask: &Mask) -> Option<Centroid> {
    let mut m00 = 0usize;
    let mut m10 = 0usize;
    let mut m01 = 0usize;

    let width = mask.cols();
    for (i, &pixel) in mask.as_slice().iter().enumerate() {
        if !pixel {
            continue;
        }
        m00 += 1;
        m10 += i % width;
        m01 += i / width;
    }

    if m00 == 0 {
        return None;
    }

    Some(Centroid {
        x: m10 as f64 / m00 as f64,
        y: m01 as f64 / m00 as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaskError;
    use crate::mask::MaskSize;

    #[test]
    fn empty_mask_has_no_centroid() -> Result<(), MaskError> {
        let mask = Mask::new([4, 4].into(), vec![false; 16])?;
        assert_eq!(compute_centroid(&mask), None);
        Ok(())
    }

    #[test]
    fn single_pixel_centroid() -> Result<(), MaskError> {
        let size = MaskSize {
            width: 8,
            height: 6,
        };
        let mut data = vec![false; size.width * size.height];
        data[3 * size.width + 5] = true;

        let mask = Mask::new(size, data)?;
        let centroid = compute_centroid(&mask).unwrap();
        assert_eq!(centroid.x, 5.0);
        assert_eq!(centroid.y, 3.0);
        Ok(())
    }

    #[test]
    fn square_region_centroid() -> Result<(), MaskError> {
        // 4x4 block with top-left corner at (row=2, col=1)
        let size = MaskSize {
            width: 10,
            height: 10,
        };
        let mut data = vec![false; size.width * size.height];
        for row in 2..6 {
            for col in 1..5 {
                data[row * size.width + col] = true;
            }
        }

        let mask = Mask::new(size, data)?;
        let centroid = compute_centroid(&mask).unwrap();
        assert_eq!(centroid.x, 2.5);
        assert_eq!(centroid.y, 3.5);
        Ok(())
    }
}
