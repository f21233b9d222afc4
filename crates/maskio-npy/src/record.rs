use crate::dtype::{ByteOrder, Dtype};

/// Typed storage for one decoded array record.
///
/// The variant is chosen at decode time from the record's `descr` field,
/// mirroring how dtype-tagged results are returned by format decoders such
/// as the TIFF `DecodingResult`.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    /// Boolean elements.
    Bool(Vec<bool>),
    /// Unsigned 8-bit elements.
    U8(Vec<u8>),
    /// Unsigned 16-bit elements.
    U16(Vec<u16>),
    /// Unsigned 32-bit elements.
    U32(Vec<u32>),
    /// Unsigned 64-bit elements.
    U64(Vec<u64>),
    /// Signed 8-bit elements.
    I8(Vec<i8>),
    /// Signed 16-bit elements.
    I16(Vec<i16>),
    /// Signed 32-bit elements.
    I32(Vec<i32>),
    /// Signed 64-bit elements.
    I64(Vec<i64>),
    /// 32-bit float elements.
    F32(Vec<f32>),
    /// 64-bit float elements.
    F64(Vec<f64>),
}

impl ArrayData {
    /// Number of elements held.
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Bool(v) => v.len(),
            ArrayData::U8(v) => v.len(),
            ArrayData::U16(v) => v.len(),
            ArrayData::U32(v) => v.len(),
            ArrayData::U64(v) => v.len(),
            ArrayData::I8(v) => v.len(),
            ArrayData::I16(v) => v.len(),
            ArrayData::I32(v) => v.len(),
            ArrayData::I64(v) => v.len(),
            ArrayData::F32(v) => v.len(),
            ArrayData::F64(v) => v.len(),
        }
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type of this buffer.
    pub fn dtype(&self) -> Dtype {
        match self {
            ArrayData::Bool(_) => Dtype::Bool,
            ArrayData::U8(_) => Dtype::U8,
            ArrayData::U16(_) => Dtype::U16,
            ArrayData::U32(_) => Dtype::U32,
            ArrayData::U64(_) => Dtype::U64,
            ArrayData::I8(_) => Dtype::I8,
            ArrayData::I16(_) => Dtype::I16,
            ArrayData::I32(_) => Dtype::I32,
            ArrayData::I64(_) => Dtype::I64,
            ArrayData::F32(_) => Dtype::F32,
            ArrayData::F64(_) => Dtype::F64,
        }
    }

    /// The element at `index` widened to `f64`, or `None` past the end.
    ///
    /// Lossy for 64-bit integers above 2^53; fine for coordinates and mask
    /// values, which is what callers use it for.
    pub fn as_f64(&self, index: usize) -> Option<f64> {
        match self {
            ArrayData::Bool(v) => v.get(index).map(|&x| if x { 1.0 } else { 0.0 }),
            ArrayData::U8(v) => v.get(index).map(|&x| x as f64),
            ArrayData::U16(v) => v.get(index).map(|&x| x as f64),
            ArrayData::U32(v) => v.get(index).map(|&x| x as f64),
            ArrayData::U64(v) => v.get(index).map(|&x| x as f64),
            ArrayData::I8(v) => v.get(index).map(|&x| x as f64),
            ArrayData::I16(v) => v.get(index).map(|&x| x as f64),
            ArrayData::I32(v) => v.get(index).map(|&x| x as f64),
            ArrayData::I64(v) => v.get(index).map(|&x| x as f64),
            ArrayData::F32(v) => v.get(index).map(|&x| x as f64),
            ArrayData::F64(v) => v.get(index).copied(),
        }
    }
}

/// One decoded array record: shape, element type and typed storage.
///
/// After a successful decode the storage is always row-major and in native
/// byte order, and `data.len() == num_elements()` unless the record was
/// produced by a lenient decode of a short data segment, in which case
/// [`ArrayRecord::truncated`] is set.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayRecord {
    /// Dimension sizes, outermost first. Empty for a scalar.
    pub shape: Vec<usize>,
    /// Element type of the storage buffer.
    pub dtype: Dtype,
    /// Typed element storage, row-major.
    pub data: ArrayData,
    /// Set when a lenient decode dropped trailing elements.
    pub truncated: bool,
}

impl ArrayRecord {
    /// Create a record from a shape and typed storage.
    pub fn new(shape: Vec<usize>, data: ArrayData) -> Self {
        Self {
            shape,
            dtype: data.dtype(),
            data,
            truncated: false,
        }
    }

    /// Number of dimensions. A scalar has rank 0.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Product of the dimension sizes. A scalar counts one element.
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }
}

/// A fixed-width scalar that can be read from packed record bytes.
pub(crate) trait Element: Copy {
    /// Element width in bytes.
    const WIDTH: usize;

    /// Read one element from exactly `WIDTH` bytes.
    fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty),*) => {
        $(impl Element for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
                let buf: [u8; std::mem::size_of::<$ty>()] =
                    bytes.try_into().expect("caller passes WIDTH bytes");
                match order {
                    ByteOrder::LittleEndian => <$ty>::from_le_bytes(buf),
                    ByteOrder::BigEndian => <$ty>::from_be_bytes(buf),
                }
            }
        })*
    };
}

impl_element!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

/// Unpack `bytes` as a sequence of `T`, honoring the byte order.
pub(crate) fn read_elements<T: Element>(bytes: &[u8], order: ByteOrder) -> Vec<T> {
    bytes
        .chunks_exact(T::WIDTH)
        .map(|chunk| T::from_bytes(chunk, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_elements_little_endian() {
        let values: Vec<u16> = read_elements(&[0x01, 0x00, 0x00, 0x02], ByteOrder::LittleEndian);
        assert_eq!(values, vec![1, 512]);
    }

    #[test]
    fn read_elements_big_endian() {
        let values: Vec<u16> = read_elements(&[0x01, 0x00, 0x00, 0x02], ByteOrder::BigEndian);
        assert_eq!(values, vec![256, 2]);
    }

    #[test]
    fn scalar_record_counts_one_element() {
        let record = ArrayRecord::new(vec![], ArrayData::F32(vec![3.5]));
        assert_eq!(record.rank(), 0);
        assert_eq!(record.num_elements(), 1);
        assert_eq!(record.dtype, Dtype::F32);
    }

    #[test]
    fn as_f64_widens_every_variant() {
        assert_eq!(ArrayData::Bool(vec![true]).as_f64(0), Some(1.0));
        assert_eq!(ArrayData::I8(vec![-3]).as_f64(0), Some(-3.0));
        assert_eq!(ArrayData::F32(vec![1.5]).as_f64(0), Some(1.5));
        assert_eq!(ArrayData::U64(vec![7]).as_f64(1), None);
    }
}
