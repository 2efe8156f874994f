//! The [`SiteValue`] bound for values stored at lattice sites.

use std::fmt;

/// A value that can be stored at a lattice site.
///
/// Values are compared with `==` to detect the empty and full sentinels,
/// copied freely between leaves, and written to disk with a fixed-width
/// little-endian encoding. [`WIDTH`](SiteValue::WIDTH) is recorded in the
/// file header and checked on load, so a file written with `u32` sites
/// cannot be silently reinterpreted as `f32` of another width.
pub trait SiteValue: Copy + PartialEq + fmt::Debug {
    /// Number of bytes in the on-disk encoding.
    const WIDTH: usize;

    /// Write the little-endian encoding into `out` (`out.len() == WIDTH`).
    fn write_le(&self, out: &mut [u8]);

    /// Decode a value from its little-endian encoding (`bytes.len() == WIDTH`).
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_site_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SiteValue for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn write_le(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_site_value!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: SiteValue>(v: T) -> Vec<u8> {
        let mut buf = vec![0u8; T::WIDTH];
        v.write_le(&mut buf);
        buf
    }

    #[test]
    fn widths_match_native_sizes() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(i16::WIDTH, 2);
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(i64::WIDTH, 8);
    }

    #[test]
    fn encoding_is_little_endian() {
        assert_eq!(encode(0x0102_0304u32), vec![4, 3, 2, 1]);
        assert_eq!(encode(-2i16), vec![0xfe, 0xff]);
    }

    #[test]
    fn float_bits_preserved() {
        let bytes = encode(-1.5f64);
        assert_eq!(f64::read_le(&bytes), -1.5);
    }

    #[test]
    #[should_panic]
    fn wrong_length_panics() {
        let _ = u32::read_le(&[1, 2]);
    }
}
