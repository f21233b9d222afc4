use crate::{
    dtype::{ByteOrder, Dtype},
    error::NpyError,
    record::{read_elements, ArrayData, ArrayRecord},
};

/// The six magic bytes every NPY record starts with.
pub const MAGIC: [u8; 6] = [0x93, b'N', b'U', b'M', b'P', b'Y'];

/// Options controlling how strictly a record is decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Accept a data segment shorter than the shape implies by dropping the
    /// trailing elements and flagging the record as truncated.
    ///
    /// Off by default: a short segment fails with
    /// [`NpyError::InsufficientData`].
    pub lenient: bool,
}

/// Fields recognized in the textual header dict.
#[derive(Debug, PartialEq)]
struct Header {
    descr: String,
    shape: Vec<usize>,
    fortran_order: bool,
}

/// Decode one NPY record in strict mode.
///
/// The data segment must hold exactly `product(shape) * byte_width` bytes.
/// See [`decode_npy_with_options`] for the lenient variant.
///
/// # Example
///
/// ```
/// use maskio_npy::{decode_npy, ArrayData};
///
/// let mut bytes = vec![0x93u8, b'N', b'U', b'M', b'P', b'Y', 1, 0];
/// let header = "{'descr': '|u1', 'fortran_order': False, 'shape': (2, 2), }";
/// bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
/// bytes.extend_from_slice(header.as_bytes());
/// bytes.extend_from_slice(&[0, 1, 2, 3]);
///
/// let record = decode_npy(&bytes).unwrap();
/// assert_eq!(record.shape, vec![2, 2]);
/// assert_eq!(record.data, ArrayData::U8(vec![0, 1, 2, 3]));
/// ```
pub fn decode_npy(src: &[u8]) -> Result<ArrayRecord, NpyError> {
    decode_npy_with_options(src, &DecodeOptions::default())
}

/// Decode one NPY record.
///
/// The record layout is: 6 magic bytes, a version byte (1 or 2), a
/// little-endian header length (u16 for version 1, u32 for version 2), the
/// textual header dict, then the packed data segment. Column-major records
/// are transposed to row-major while materializing, and big-endian data is
/// byte-swapped into native order, so the returned record is always
/// row-major native.
pub fn decode_npy_with_options(
    src: &[u8],
    options: &DecodeOptions,
) -> Result<ArrayRecord, NpyError> {
    if src.len() < MAGIC.len() || src[..MAGIC.len()] != MAGIC {
        return Err(NpyError::BadMagic);
    }

    let version = *src.get(MAGIC.len()).ok_or(NpyError::TruncatedHeader {
        declared: 1,
        available: 0,
    })?;

    // header length field: u16 for version 1, u32 for version 2
    let len_field = MAGIC.len() + 1;
    let (header_len, header_start) = match version {
        1 => {
            let bytes = src
                .get(len_field..len_field + 2)
                .ok_or(NpyError::TruncatedHeader {
                    declared: 2,
                    available: src.len() - len_field,
                })?;
            let len = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
            (len, len_field + 2)
        }
        2 => {
            let bytes = src
                .get(len_field..len_field + 4)
                .ok_or(NpyError::TruncatedHeader {
                    declared: 4,
                    available: src.len() - len_field,
                })?;
            let len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
            (len, len_field + 4)
        }
        other => return Err(NpyError::UnsupportedVersion(other)),
    };

    let header_bytes =
        src.get(header_start..header_start + header_len)
            .ok_or(NpyError::TruncatedHeader {
                declared: header_len,
                available: src.len() - header_start,
            })?;

    let header_text = std::str::from_utf8(header_bytes)
        .map_err(|e| NpyError::MalformedHeader(format!("header is not valid UTF-8: {e}")))?;
    let header = parse_header(header_text)?;

    let (dtype, byte_order) = Dtype::from_descr(&header.descr)?;
    let width = dtype.byte_width();
    let num_elements = header
        .shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .and_then(|n| n.checked_mul(width).map(|_| n))
        .ok_or_else(|| NpyError::MalformedHeader("shape overflows".to_string()))?;
    let expected = num_elements * width;

    let data_start = header_start + header_len;
    let available = src.len() - data_start;

    let num_elements = if available < expected {
        if !options.lenient || header.fortran_order {
            // a truncated column-major segment cannot be transposed, so the
            // lenient path only applies to row-major records
            return Err(NpyError::InsufficientData {
                expected,
                available,
            });
        }
        log::warn!(
            "data segment holds {} of {} expected bytes, truncating to {} whole elements",
            available,
            expected,
            available / width
        );
        available / width
    } else {
        num_elements
    };

    let data_bytes = &src[data_start..data_start + num_elements * width];
    let mut data = materialize(data_bytes, dtype, byte_order);

    if header.fortran_order && header.shape.len() > 1 {
        data = transpose_to_row_major(&data, &header.shape);
    }

    Ok(ArrayRecord {
        dtype,
        truncated: data.len() < header.shape.iter().product(),
        shape: header.shape,
        data,
    })
}

/// Unpack the data segment into typed storage, honoring the byte order.
fn materialize(bytes: &[u8], dtype: Dtype, order: ByteOrder) -> ArrayData {
    match dtype {
        Dtype::Bool => ArrayData::Bool(bytes.iter().map(|&b| b != 0).collect()),
        Dtype::U8 => ArrayData::U8(bytes.to_vec()),
        Dtype::U16 => ArrayData::U16(read_elements(bytes, order)),
        Dtype::U32 => ArrayData::U32(read_elements(bytes, order)),
        Dtype::U64 => ArrayData::U64(read_elements(bytes, order)),
        Dtype::I8 => ArrayData::I8(bytes.iter().map(|&b| b as i8).collect()),
        Dtype::I16 => ArrayData::I16(read_elements(bytes, order)),
        Dtype::I32 => ArrayData::I32(read_elements(bytes, order)),
        Dtype::I64 => ArrayData::I64(read_elements(bytes, order)),
        Dtype::F32 => ArrayData::F32(read_elements(bytes, order)),
        Dtype::F64 => ArrayData::F64(read_elements(bytes, order)),
    }
}

/// Reorder a column-major buffer into row-major for the given shape.
fn transpose_to_row_major(data: &ArrayData, shape: &[usize]) -> ArrayData {
    match data {
        ArrayData::Bool(v) => ArrayData::Bool(transpose_vec(v, shape)),
        ArrayData::U8(v) => ArrayData::U8(transpose_vec(v, shape)),
        ArrayData::U16(v) => ArrayData::U16(transpose_vec(v, shape)),
        ArrayData::U32(v) => ArrayData::U32(transpose_vec(v, shape)),
        ArrayData::U64(v) => ArrayData::U64(transpose_vec(v, shape)),
        ArrayData::I8(v) => ArrayData::I8(transpose_vec(v, shape)),
        ArrayData::I16(v) => ArrayData::I16(transpose_vec(v, shape)),
        ArrayData::I32(v) => ArrayData::I32(transpose_vec(v, shape)),
        ArrayData::I64(v) => ArrayData::I64(transpose_vec(v, shape)),
        ArrayData::F32(v) => ArrayData::F32(transpose_vec(v, shape)),
        ArrayData::F64(v) => ArrayData::F64(transpose_vec(v, shape)),
    }
}

fn transpose_vec<T: Copy>(src: &[T], shape: &[usize]) -> Vec<T> {
    // column-major strides: first axis fastest
    let mut strides = vec![1usize; shape.len()];
    for d in 1..shape.len() {
        strides[d] = strides[d - 1] * shape[d - 1];
    }

    let mut dst = Vec::with_capacity(src.len());
    let mut index = vec![0usize; shape.len()];
    for _ in 0..src.len() {
        let offset: usize = index.iter().zip(&strides).map(|(i, s)| i * s).sum();
        dst.push(src[offset]);

        // advance the row-major multi-index, last axis fastest
        for d in (0..shape.len()).rev() {
            index[d] += 1;
            if index[d] < shape[d] {
                break;
            }
            index[d] = 0;
        }
    }
    dst
}

/// Parse the textual header dict.
///
/// Handles the grammar NumPy writes: single-quoted keys and values, a
/// parenthesized shape tuple with an optional trailing comma, a `True` or
/// `False` literal for `fortran_order`, and trailing space padding. Missing
/// `descr` or `shape` is a malformed header; a missing `fortran_order`
/// defaults to row-major.
fn parse_header(text: &str) -> Result<Header, NpyError> {
    let text = text.trim_end_matches(['\n', ' ', '\0']);

    let descr = quoted_value(text, "descr")
        .ok_or_else(|| NpyError::MalformedHeader("missing 'descr' field".to_string()))?
        .to_string();

    let shape = parse_shape(text)?;

    let fortran_order = match literal_value(text, "fortran_order") {
        Some("True") => true,
        _ => false,
    };

    Ok(Header {
        descr,
        shape,
        fortran_order,
    })
}

/// The quoted string following `'key':`, with either quote style.
fn quoted_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let rest = value_after_key(text, key)?;
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(&rest[..end])
}

/// The unquoted literal following `'key':`, up to the next delimiter.
fn literal_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let rest = value_after_key(text, key)?;
    let end = rest
        .find([',', '}'])
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Text following the colon after a quoted `key`, left-trimmed.
fn value_after_key<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let pos = text
        .find(&format!("'{key}'"))
        .or_else(|| text.find(&format!("\"{key}\"")))?;
    let rest = &text[pos + key.len() + 2..];
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim_start())
}

fn parse_shape(text: &str) -> Result<Vec<usize>, NpyError> {
    let malformed = |msg: &str| NpyError::MalformedHeader(msg.to_string());

    let rest = value_after_key(text, "shape")
        .ok_or_else(|| malformed("missing 'shape' field"))?;
    let rest = rest
        .strip_prefix('(')
        .ok_or_else(|| malformed("shape is not a parenthesized tuple"))?;
    let end = rest
        .find(')')
        .ok_or_else(|| malformed("unterminated shape tuple"))?;

    let mut shape = Vec::new();
    for dim in rest[..end].split(',') {
        let dim = dim.trim();
        if dim.is_empty() {
            // trailing comma in "(3,)" or the empty scalar tuple "()"
            continue;
        }
        let size = dim
            .parse::<usize>()
            .map_err(|_| malformed(&format!("invalid shape dimension '{dim}'")))?;
        shape.push(size);
    }
    Ok(shape)
}
