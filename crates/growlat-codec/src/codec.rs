//! Binary encode/decode for the lattice file format.
//!
//! All integers are little-endian and fixed-width. There is no alignment
//! padding, no length prefix and no self-describing schema: the reader
//! must know `T` and `R` in advance, which is why the header records them.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;

use growlat_core::{Rect, SiteInfo, SiteValue};

use crate::error::CodecError;
use crate::types::{ChildTag, FileHeader, FormatVersion, SquareHeader};
use crate::{LEGACY_MAGIC, MAGIC, TRAILER};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), CodecError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i64.
pub fn write_i64_le(w: &mut dyn Write, v: i64) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write one site value.
pub fn write_value<T: SiteValue>(w: &mut dyn Write, v: T) -> Result<(), CodecError> {
    let mut buf = vec![0u8; T::WIDTH];
    v.write_le(&mut buf);
    w.write_all(&buf)?;
    Ok(())
}

/// Write a run of site values with a single `write_all`.
pub fn write_values<T: SiteValue>(w: &mut dyn Write, values: &[T]) -> Result<(), CodecError> {
    let mut buf = vec![0u8; values.len() * T::WIDTH];
    for (v, chunk) in values.iter().zip(buf.chunks_exact_mut(T::WIDTH)) {
        v.write_le(chunk);
    }
    w.write_all(&buf)?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CodecError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a little-endian i64.
pub fn read_i64_le(r: &mut dyn Read) -> Result<i64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read one site value.
pub fn read_value<T: SiteValue>(r: &mut dyn Read) -> Result<T, CodecError> {
    let mut buf = vec![0u8; T::WIDTH];
    r.read_exact(&mut buf)?;
    Ok(T::read_le(&buf))
}

/// Read `count` consecutive site values.
pub fn read_values<T: SiteValue>(r: &mut dyn Read, count: usize) -> Result<Vec<T>, CodecError> {
    let mut buf = vec![0u8; count * T::WIDTH];
    r.read_exact(&mut buf)?;
    Ok(buf.chunks_exact(T::WIDTH).map(T::read_le).collect())
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the current-format header: magic, value width and leaf radius.
pub fn encode_header(w: &mut dyn Write, value_width: u64, radius: u64) -> Result<(), CodecError> {
    w.write_all(&MAGIC)?;
    write_u64_le(w, value_width)?;
    write_u64_le(w, radius)?;
    Ok(())
}

/// Decode the file header, accepting both the current and legacy tags.
pub fn decode_header(r: &mut dyn Read) -> Result<FileHeader, CodecError> {
    let mut magic = [0u8; 5];
    r.read_exact(&mut magic)?;
    if magic == LEGACY_MAGIC {
        return Ok(FileHeader {
            version: FormatVersion::Legacy,
            value_width: None,
            radius: None,
        });
    }
    if magic != MAGIC {
        return Err(CodecError::InvalidMagic { found: magic });
    }
    let value_width = read_u64_le(r)?;
    let radius = read_u64_le(r)?;
    Ok(FileHeader {
        version: FormatVersion::Current,
        value_width: Some(value_width),
        radius: Some(radius),
    })
}

/// Open `path` and decode only its header.
///
/// Lets a tool discover the value width and radius of a file before
/// picking the concrete lattice type to load it with.
pub fn read_file_header(path: impl AsRef<Path>) -> Result<FileHeader, CodecError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode_header(&mut reader)
}

impl FileHeader {
    /// Check the header against the value width and radius of the lattice
    /// being loaded. Legacy headers carry neither and always pass.
    pub fn validate(&self, value_width: u64, radius: u64) -> Result<(), CodecError> {
        if let Some(found) = self.value_width {
            if found != value_width {
                return Err(CodecError::ValueWidthMismatch {
                    found,
                    expected: value_width,
                });
            }
        }
        if let Some(found) = self.radius {
            if found != radius {
                return Err(CodecError::RadiusMismatch {
                    found,
                    expected: radius,
                });
            }
        }
        Ok(())
    }
}

// ── Aggregate encode/decode ─────────────────────────────────────

/// Encode the lattice aggregate (sentinels, counters, bounding box).
pub fn encode_site_info<T: SiteValue>(
    w: &mut dyn Write,
    info: &SiteInfo<T>,
) -> Result<(), CodecError> {
    write_value(w, info.empty)?;
    write_value(w, info.full)?;
    write_i64_le(w, info.non_empty)?;
    write_i64_le(w, info.full_count)?;
    write_i64_le(w, info.bbox.x_min)?;
    write_i64_le(w, info.bbox.x_max)?;
    write_i64_le(w, info.bbox.y_min)?;
    write_i64_le(w, info.bbox.y_max)?;
    Ok(())
}

/// Decode the lattice aggregate.
pub fn decode_site_info<T: SiteValue>(r: &mut dyn Read) -> Result<SiteInfo<T>, CodecError> {
    let empty = read_value(r)?;
    let full = read_value(r)?;
    let non_empty = read_i64_le(r)?;
    let full_count = read_i64_le(r)?;
    let x_min = read_i64_le(r)?;
    let x_max = read_i64_le(r)?;
    let y_min = read_i64_le(r)?;
    let y_max = read_i64_le(r)?;
    Ok(SiteInfo {
        empty,
        full,
        non_empty,
        full_count,
        bbox: Rect::new(x_min, x_max, y_min, y_max),
    })
}

// ── Tree framing ────────────────────────────────────────────────

/// Encode the header common to nodes and leaves.
pub fn encode_square_header(w: &mut dyn Write, h: &SquareHeader) -> Result<(), CodecError> {
    write_i64_le(w, h.center_x)?;
    write_i64_le(w, h.center_y)?;
    write_i64_le(w, h.sub_radius)?;
    Ok(())
}

/// Decode the header common to nodes and leaves.
pub fn decode_square_header(r: &mut dyn Read) -> Result<SquareHeader, CodecError> {
    Ok(SquareHeader {
        center_x: read_i64_le(r)?,
        center_y: read_i64_le(r)?,
        sub_radius: read_i64_le(r)?,
    })
}

/// Encode the nine child tags of a node, `i` outer.
pub fn encode_child_tags(w: &mut dyn Write, tags: &[[ChildTag; 3]; 3]) -> Result<(), CodecError> {
    let mut buf = [0u8; 9];
    for (i, row) in tags.iter().enumerate() {
        for (j, tag) in row.iter().enumerate() {
            buf[3 * i + j] = *tag as u8;
        }
    }
    w.write_all(&buf)?;
    Ok(())
}

/// Decode the nine child tags of a node, `i` outer.
pub fn decode_child_tags(r: &mut dyn Read) -> Result<[[ChildTag; 3]; 3], CodecError> {
    let mut buf = [0u8; 9];
    r.read_exact(&mut buf)?;
    let mut tags = [[ChildTag::Empty; 3]; 3];
    for (i, row) in tags.iter_mut().enumerate() {
        for (j, tag) in row.iter_mut().enumerate() {
            *tag = ChildTag::from_u8(buf[3 * i + j])?;
        }
    }
    Ok(tags)
}

// ── Trailer ─────────────────────────────────────────────────────

/// Encode the closing trailer.
pub fn encode_trailer(w: &mut dyn Write) -> Result<(), CodecError> {
    w.write_all(&TRAILER)?;
    Ok(())
}

/// Decode the trailer and require the stream to end right after it.
pub fn decode_trailer(r: &mut dyn Read) -> Result<(), CodecError> {
    let mut found = [0u8; 4];
    r.read_exact(&mut found)?;
    if found != TRAILER {
        return Err(CodecError::InvalidTrailer { found });
    }
    let mut tail = [0u8; 1];
    loop {
        match r.read(&mut tail) {
            Ok(0) => return Ok(()),
            Ok(_) => return Err(CodecError::TrailingData),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_fixed() {
        let mut buf = Vec::new();
        encode_header(&mut buf, 4, 30).unwrap();
        assert_eq!(buf.len(), 5 + 8 + 8);
        assert_eq!(&buf[..5], b"glZ2!");
        assert_eq!(&buf[5..13], &4u64.to_le_bytes());
        assert_eq!(&buf[13..21], &30u64.to_le_bytes());

        let header = decode_header(&mut buf.as_slice()).unwrap();
        assert_eq!(header.version, FormatVersion::Current);
        assert_eq!(header.value_width, Some(4));
        assert_eq!(header.radius, Some(30));
    }

    #[test]
    fn legacy_header_has_no_fields() {
        let header = decode_header(&mut &b"GLZ2!rest"[..]).unwrap();
        assert_eq!(header.version, FormatVersion::Legacy);
        assert!(header.validate(8, 5).is_ok());
    }

    #[test]
    fn bad_magic_rejected() {
        let err = decode_header(&mut &b"JUNK!"[..]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidMagic { found } if &found == b"JUNK!"));
    }

    #[test]
    fn truncated_header_is_io_error() {
        let err = decode_header(&mut &b"glZ2!\x01\x00"[..]).unwrap_err();
        assert!(matches!(err, CodecError::Io(ref e) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[test]
    fn validate_reports_mismatch() {
        let header = FileHeader {
            version: FormatVersion::Current,
            value_width: Some(1),
            radius: Some(5),
        };
        assert!(header.validate(1, 5).is_ok());
        assert!(matches!(
            header.validate(8, 5),
            Err(CodecError::ValueWidthMismatch {
                found: 1,
                expected: 8
            })
        ));
        assert!(matches!(
            header.validate(1, 10),
            Err(CodecError::RadiusMismatch {
                found: 5,
                expected: 10
            })
        ));
    }

    #[test]
    fn site_info_is_packed() {
        let mut info = SiteInfo::new(0u8, 1u8);
        info.non_empty = 3;
        info.full_count = 2;
        info.bbox = Rect::new(-1, 4, 2, 9);
        let mut buf = Vec::new();
        encode_site_info(&mut buf, &info).unwrap();
        assert_eq!(buf.len(), 2 + 6 * 8);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 1);
        let back: SiteInfo<u8> = decode_site_info(&mut buf.as_slice()).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn child_tags_are_row_major() {
        let mut tags = [[ChildTag::Empty; 3]; 3];
        tags[0][2] = ChildTag::Leaf;
        tags[2][0] = ChildTag::Full;
        let mut buf = Vec::new();
        encode_child_tags(&mut buf, &tags).unwrap();
        assert_eq!(buf, vec![0, 0, 2, 0, 0, 0, 1, 0, 0]);
        assert_eq!(decode_child_tags(&mut buf.as_slice()).unwrap(), tags);
    }

    #[test]
    fn values_written_in_order() {
        let mut buf = Vec::new();
        write_values(&mut buf, &[1u16, 0x0203]).unwrap();
        assert_eq!(buf, vec![1, 0, 3, 2]);
        let back: Vec<u16> = read_values(&mut buf.as_slice(), 2).unwrap();
        assert_eq!(back, vec![1, 0x0203]);
    }

    #[test]
    fn trailer_must_end_stream() {
        assert!(decode_trailer(&mut &b"end!"[..]).is_ok());
        assert!(matches!(
            decode_trailer(&mut &b"end!x"[..]),
            Err(CodecError::TrailingData)
        ));
        assert!(matches!(
            decode_trailer(&mut &b"END!"[..]),
            Err(CodecError::InvalidTrailer { .. })
        ));
        assert!(matches!(
            decode_trailer(&mut &b"en"[..]),
            Err(CodecError::Io(_))
        ));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn square_header_survives_encoding(
                cx in any::<i64>(), cy in any::<i64>(), sr in 1i64..1_000_000,
            ) {
                let h = SquareHeader { center_x: cx, center_y: cy, sub_radius: sr };
                let mut buf = Vec::new();
                encode_square_header(&mut buf, &h).unwrap();
                prop_assert_eq!(buf.len(), 24);
                prop_assert_eq!(decode_square_header(&mut buf.as_slice()).unwrap(), h);
            }
        }
    }
}
