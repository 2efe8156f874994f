//! Binary file format primitives for growlat lattices.
//!
//! A lattice file is a fixed-width little-endian dump of the lattice
//! aggregate followed by a depth-first walk of the square tree. This crate
//! owns the framing (tags, header, aggregate, trailer) and the primitive
//! readers/writers; the tree walk itself lives next to the tree in
//! `growlat-lattice`.
//!
//! # Format
//!
//! ```text
//! [MAGIC "glZ2!"] [value width u64] [R u64]
//! [SiteInfo: empty(T) full(T) non_empty(i64) full_count(i64) x_min x_max y_min y_max]
//! [root node] ... (depth-first)
//! [TRAILER "end!"] <end of stream>
//! ```
//!
//! Files written before the width/radius header existed start with
//! [`LEGACY_MAGIC`] and go straight to the aggregate. They are still read,
//! never written.
//!
//! # Layout of the aggregate
//!
//! The aggregate is written field by field with no padding. Files produced
//! by the older C++ tool dumped the aggregate as a raw struct, which puts
//! alignment padding after the two sentinels whenever the value type is
//! narrower than 8 bytes. Such files are only byte-compatible for 8-byte
//! values (`u64`, `i64`, `f64`); for narrower values the counters are read
//! at the wrong offsets and the load is rejected by validation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{
    decode_header, decode_site_info, decode_square_header, decode_trailer, encode_header,
    encode_site_info, encode_square_header, encode_trailer, read_file_header,
};
pub use error::CodecError;
pub use types::{ChildTag, FileHeader, FormatVersion, SquareHeader};

/// Magic bytes at the start of every file written by this crate.
pub const MAGIC: [u8; 5] = *b"glZ2!";

/// Magic bytes of the legacy format (no width/radius header).
pub const LEGACY_MAGIC: [u8; 5] = *b"GLZ2!";

/// Trailer bytes closing every file.
pub const TRAILER: [u8; 4] = *b"end!";
