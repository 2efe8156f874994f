//! Error types for lattice construction.

use std::error::Error;
use std::fmt;

/// Errors arising when a lattice is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// The empty and full sentinels compare equal, so compression could
    /// not tell an empty block from a full one.
    IndistinctSentinels {
        /// Debug rendering of the shared value.
        value: String,
    },
    /// A sentinel does not compare equal to itself (a floating-point NaN),
    /// so sites holding it could never be recognized.
    UnstableSentinel {
        /// Debug rendering of the offending value.
        value: String,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndistinctSentinels { value } => {
                write!(f, "empty and full sentinels must differ (both are {value})")
            }
            Self::UnstableSentinel { value } => {
                write!(f, "sentinel {value} does not compare equal to itself")
            }
        }
    }
}

impl Error for LatticeError {}
