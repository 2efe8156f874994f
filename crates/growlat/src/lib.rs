//! Growlat: a compressed, growable sparse lattice on Z².
//!
//! This is the top-level facade crate that re-exports the public API from
//! all growlat sub-crates. For most users, adding `growlat` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use growlat::prelude::*;
//!
//! // Sites hold a u8; 0 is the background, 1 marks an occupied site.
//! let mut lattice: GrowingLattice<u8> = GrowingLattice::new(0, 1).unwrap();
//! for x in -100..=100 {
//!     for y in -100..=100 {
//!         lattice.set(1, x, y);
//!     }
//! }
//! lattice.set(7, 1_000_000, -3);
//!
//! assert_eq!(lattice.get(50, -50), 1);
//! assert_eq!(lattice.get(1_000_000, -3), 7);
//! assert_eq!(lattice.full_count(), 201 * 201);
//! assert_eq!(lattice.range(), Some(Rect::new(-100, 1_000_000, -100, 100)));
//!
//! // The whole occupied square is found without touching individual sites.
//! let block = lattice.improved_enclosing_rect_full(0, 0).unwrap();
//! assert!(block.contains(0, 0));
//!
//! let mut bytes = Vec::new();
//! lattice.save_to(&mut bytes).unwrap();
//! let mut copy: GrowingLattice<u8> = GrowingLattice::new(0, 1).unwrap();
//! copy.load_from(bytes.as_slice()).unwrap();
//! assert_eq!(copy, lattice);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `growlat-core` | `SiteValue`, `SiteInfo`, `Rect`, errors, colors |
//! | [`arena`] | `growlat-arena` | Slabs, node/leaf handles, arena sizing |
//! | [`codec`] | `growlat-codec` | File header, framing, primitive readers/writers |
//! | [`lattice`] | `growlat-lattice` | `GrowingLattice`, diagnostics, palette |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`growlat-core`).
///
/// Contains the [`types::SiteValue`] bound, the [`types::SiteInfo`]
/// aggregate, inclusive rectangles and the [`types::ColorSource`] contract
/// used by plotting front-ends.
pub use growlat_core as types;

/// Slot arenas and typed handles (`growlat-arena`).
///
/// Most users only touch [`arena::ArenaConfig`], to pre-size the arenas
/// of a lattice expected to grow large.
pub use growlat_arena as arena;

/// Binary file format (`growlat-codec`).
///
/// [`codec::read_file_header`] peeks at a file's value width and leaf
/// radius before choosing the lattice type to load it into.
pub use growlat_codec as codec;

/// The lattice itself (`growlat-lattice`).
///
/// [`lattice::GrowingLattice`] plus its memory and invariant diagnostics.
pub use growlat_lattice as lattice;

/// Common imports for typical growlat usage.
///
/// ```rust
/// use growlat::prelude::*;
/// ```
///
/// This imports the lattice, its value and geometry types, and the errors
/// its operations return.
pub mod prelude {
    // Lattice
    pub use growlat_lattice::{GrowingLattice, SitePalette};

    // Core types and traits
    pub use growlat_core::{ColorSource, Rect, Rgb, SiteInfo, SiteKind, SiteValue};

    // Arena sizing
    pub use growlat_arena::ArenaConfig;

    // Errors
    pub use growlat_codec::CodecError;
    pub use growlat_core::LatticeError;
}
