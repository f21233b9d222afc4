use crate::{
    decode::MAGIC,
    error::NpyError,
    record::{ArrayData, ArrayRecord},
};

/// Total header size (magic through padding) is aligned to this, matching
/// what NumPy writes.
const HEADER_ALIGN: usize = 64;

/// Encode a record into the NPY binary layout.
///
/// Writes a version-1 header unless the header dict is too large for a u16
/// length field, in which case version 2 is used. The record is written
/// row-major little-endian, the canonical form produced by the decoder.
///
/// Fails with [`NpyError::InsufficientData`] when the record's storage
/// holds fewer elements than its shape implies (a truncated record cannot
/// be re-encoded).
pub fn encode_npy(record: &ArrayRecord) -> Result<Vec<u8>, NpyError> {
    let num_elements = record.num_elements();
    if record.data.len() < num_elements {
        return Err(NpyError::InsufficientData {
            expected: num_elements * record.dtype.byte_width(),
            available: record.data.len() * record.dtype.byte_width(),
        });
    }

    let dict = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': {}, }}",
        record.dtype.to_descr(),
        shape_tuple(&record.shape)
    );

    // pick the version from the unpadded length; padding never pushes a
    // v1-sized header over the u16 limit by more than the alignment
    let (version, len_field_size) = if dict.len() + HEADER_ALIGN <= u16::MAX as usize {
        (1u8, 2)
    } else {
        (2u8, 4)
    };

    let prefix = MAGIC.len() + 1 + len_field_size;
    let padded = (prefix + dict.len() + 1).div_ceil(HEADER_ALIGN) * HEADER_ALIGN;
    let header_len = padded - prefix;

    let mut bytes = Vec::with_capacity(padded + num_elements * record.dtype.byte_width());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(version);
    match version {
        1 => bytes.extend_from_slice(&(header_len as u16).to_le_bytes()),
        _ => bytes.extend_from_slice(&(header_len as u32).to_le_bytes()),
    }
    bytes.extend_from_slice(dict.as_bytes());
    bytes.resize(padded - 1, b' ');
    bytes.push(b'\n');

    write_data(&mut bytes, &record.data);
    Ok(bytes)
}

/// The Python-tuple rendering of a shape: `()`, `(3,)`, `(2, 3)`.
fn shape_tuple(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({n},)"),
        dims => {
            let inner: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", inner.join(", "))
        }
    }
}

fn write_data(bytes: &mut Vec<u8>, data: &ArrayData) {
    match data {
        ArrayData::Bool(v) => bytes.extend(v.iter().map(|&x| x as u8)),
        ArrayData::U8(v) => bytes.extend_from_slice(v),
        ArrayData::U16(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::U32(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::U64(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::I8(v) => bytes.extend(v.iter().map(|&x| x as u8)),
        ArrayData::I16(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::I32(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::I64(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::F32(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
        ArrayData::F64(v) => bytes.extend(v.iter().flat_map(|x| x.to_le_bytes())),
    }
}
