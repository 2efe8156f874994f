//! Error types for saving and loading lattice files.

use std::fmt;
use std::io;

/// Errors that can occur while writing or reading a lattice file.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred during read or write, including a short read.
    Io(io::Error),
    /// The file does not start with `b"glZ2!"` or `b"GLZ2!"`.
    InvalidMagic {
        /// The five bytes found at the start of the stream.
        found: [u8; 5],
    },
    /// The file stores values of a different byte width.
    ValueWidthMismatch {
        /// Width recorded in the file.
        found: u64,
        /// Width of the value type being loaded.
        expected: u64,
    },
    /// The file was written with a different leaf radius `R`.
    RadiusMismatch {
        /// Radius recorded in the file.
        found: u64,
        /// Radius of the lattice being loaded.
        expected: u64,
    },
    /// The square tree could not be decoded (bad tag, inconsistent geometry
    /// or counters).
    MalformedTree {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The tree is not followed by `b"end!"`.
    InvalidTrailer {
        /// The four bytes found where the trailer was expected.
        found: [u8; 4],
    },
    /// Bytes remain after the trailer.
    TrailingData,
}

impl CodecError {
    /// Shorthand for a [`CodecError::MalformedTree`].
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedTree {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic { found } => write!(
                f,
                "invalid magic bytes {:?} (expected b\"glZ2!\" or b\"GLZ2!\")",
                String::from_utf8_lossy(found)
            ),
            Self::ValueWidthMismatch { found, expected } => {
                write!(f, "value width mismatch: file has {found} bytes, expected {expected}")
            }
            Self::RadiusMismatch { found, expected } => {
                write!(f, "leaf radius mismatch: file has R={found}, expected R={expected}")
            }
            Self::MalformedTree { detail } => write!(f, "malformed tree: {detail}"),
            Self::InvalidTrailer { found } => write!(
                f,
                "invalid trailer {:?} (expected b\"end!\")",
                String::from_utf8_lossy(found)
            ),
            Self::TrailingData => write!(f, "unexpected data after trailer"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
