//! Compressed, growable sparse lattice over `Z²`.
//!
//! [`GrowingLattice`] stores one value per site of the integer plane.
//! Storage is a tree of 3×3 nodes over `(2R+1)²` leaf blocks: the tree
//! grows from the origin as far sites are written and shrinks back when
//! they are cleared, and every subtree whose sites are all empty or all
//! full is replaced by a sentinel slot. Lattices save to and load from a
//! compact binary format (see `growlat-codec`).
//!
//! # Crate layout
//!
//! - `tree`: the arena-backed square tree and its write/compression
//!   algorithms.
//! - `query`: enclosing full-rectangle queries.
//! - `persist`: depth-first tree serialization.
//! - `diag`: memory report, tree dump and the structural checker.
//! - [`lattice`]: the public facade.
//! - [`palette`]: per-site colors for plotters.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod child;
mod diag;
mod leaf;
mod node;
mod persist;
mod query;
mod tree;

pub mod lattice;
pub mod palette;

pub use diag::{InvariantViolation, MemoryReport};
pub use lattice::GrowingLattice;
pub use palette::SitePalette;
