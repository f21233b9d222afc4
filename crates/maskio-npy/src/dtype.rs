use crate::error::NpyError;

/// Byte order of the packed elements in a record's data segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

/// Element type of an array record.
///
/// Covers the types the NumPy `descr` grammar can express with byte widths
/// 1, 2, 4 and 8. Booleans are stored on disk as single bytes (`b1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dtype {
    /// Boolean stored as one byte.
    Bool,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
}

impl Dtype {
    /// Size of one element in bytes.
    pub fn byte_width(&self) -> usize {
        match self {
            Dtype::Bool | Dtype::U8 | Dtype::I8 => 1,
            Dtype::U16 | Dtype::I16 => 2,
            Dtype::U32 | Dtype::I32 | Dtype::F32 => 4,
            Dtype::U64 | Dtype::I64 | Dtype::F64 => 8,
        }
    }

    /// Parse a `descr` string such as `<u1`, `>f4` or `|b1`.
    ///
    /// A leading `|` marks the byte order as not applicable and is
    /// normalized to little-endian. A missing order marker is treated the
    /// same way.
    pub fn from_descr(descr: &str) -> Result<(Self, ByteOrder), NpyError> {
        let unsupported = || NpyError::UnsupportedDtype(descr.to_string());

        let (order, rest) = match descr.chars().next() {
            Some('<') | Some('|') | Some('=') => (ByteOrder::LittleEndian, &descr[1..]),
            Some('>') => (ByteOrder::BigEndian, &descr[1..]),
            Some(c) if c.is_ascii_alphabetic() => (ByteOrder::LittleEndian, descr),
            _ => return Err(unsupported()),
        };

        let mut chars = rest.chars();
        let kind = chars.next().ok_or_else(unsupported)?;
        let width: usize = chars.as_str().parse().map_err(|_| unsupported())?;

        let dtype = match (kind, width) {
            ('b', 1) => Dtype::Bool,
            ('u', 1) => Dtype::U8,
            ('u', 2) => Dtype::U16,
            ('u', 4) => Dtype::U32,
            ('u', 8) => Dtype::U64,
            ('i', 1) => Dtype::I8,
            ('i', 2) => Dtype::I16,
            ('i', 4) => Dtype::I32,
            ('i', 8) => Dtype::I64,
            ('f', 4) => Dtype::F32,
            ('f', 8) => Dtype::F64,
            _ => return Err(unsupported()),
        };

        Ok((dtype, order))
    }

    /// The canonical little-endian `descr` string for this type.
    ///
    /// Single-byte types carry the `|` not-applicable marker, matching what
    /// NumPy itself writes.
    pub fn to_descr(&self) -> &'static str {
        match self {
            Dtype::Bool => "|b1",
            Dtype::U8 => "|u1",
            Dtype::U16 => "<u2",
            Dtype::U32 => "<u4",
            Dtype::U64 => "<u8",
            Dtype::I8 => "|i1",
            Dtype::I16 => "<i2",
            Dtype::I32 => "<i4",
            Dtype::I64 => "<i8",
            Dtype::F32 => "<f4",
            Dtype::F64 => "<f8",
        }
    }
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_descr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_descr_variants() -> Result<(), NpyError> {
        assert_eq!(
            Dtype::from_descr("<u1")?,
            (Dtype::U8, ByteOrder::LittleEndian)
        );
        assert_eq!(
            Dtype::from_descr(">f4")?,
            (Dtype::F32, ByteOrder::BigEndian)
        );
        assert_eq!(
            Dtype::from_descr("|b1")?,
            (Dtype::Bool, ByteOrder::LittleEndian)
        );
        // no order marker defaults to little-endian
        assert_eq!(
            Dtype::from_descr("i2")?,
            (Dtype::I16, ByteOrder::LittleEndian)
        );
        Ok(())
    }

    #[test]
    fn parse_descr_rejects_unknown() {
        assert!(matches!(
            Dtype::from_descr("<f2"),
            Err(NpyError::UnsupportedDtype(_))
        ));
        assert!(matches!(
            Dtype::from_descr("<c8"),
            Err(NpyError::UnsupportedDtype(_))
        ));
        assert!(matches!(
            Dtype::from_descr(""),
            Err(NpyError::UnsupportedDtype(_))
        ));
    }

    #[test]
    fn descr_round_trip() -> Result<(), NpyError> {
        for dtype in [
            Dtype::Bool,
            Dtype::U8,
            Dtype::U16,
            Dtype::U32,
            Dtype::U64,
            Dtype::I8,
            Dtype::I16,
            Dtype::I32,
            Dtype::I64,
            Dtype::F32,
            Dtype::F64,
        ] {
            let (parsed, order) = Dtype::from_descr(dtype.to_descr())?;
            assert_eq!(parsed, dtype);
            assert_eq!(order, ByteOrder::LittleEndian);
        }
        Ok(())
    }
}
