//! Slot arenas and typed handles for growlat tree squares.
//!
//! The lattice tree stores its nodes and leaves in two [`Slab`]s and links
//! them with plain `u32` handles. Parents own their children logically; a
//! child's back-reference to its parent is just another handle, so the
//! frequent restructuring of the tree (new root levels, zooming in,
//! collapsing uniform subtrees) never fights the borrow checker.
//!
//! # Architecture
//!
//! ```text
//! Slab<K, T>
//! ├── slots: Vec<Option<T>>   (live and vacant)
//! └── free_list: Vec<u32>     (vacant slot indices, reused LIFO)
//! ```
//!
//! Handles are not generational: removing a square and inserting another
//! one may hand out the same index. The tree never keeps a handle to a
//! removed square, and any access through a vacant slot panics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod handle;
pub mod slab;

pub use config::ArenaConfig;
pub use handle::{LeafId, NodeId, SlotKey};
pub use slab::Slab;
