//! Typed slot handles.
//!
//! [`NodeId`] and [`LeafId`] index the two slabs of a lattice tree. Keeping
//! them as distinct types means a leaf handle can never be used to look up
//! a node.

use std::fmt;

/// A `u32` slot index usable as a [`Slab`](crate::Slab) key.
pub trait SlotKey: Copy + Eq + fmt::Debug {
    /// Wrap a raw slot index.
    fn from_index(index: u32) -> Self;

    /// The raw slot index.
    fn index(self) -> usize;
}

/// Handle to a 3×3 node square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Handle to a leaf block of sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub u32);

impl SlotKey for NodeId {
    #[inline]
    fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl SlotKey for LeafId {
    #[inline]
    fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf#{}", self.0)
    }
}
