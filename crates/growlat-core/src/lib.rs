//! Core types and traits for the growlat sparse lattice.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the rest of the workspace:
//! the [`SiteValue`] bound for stored values, the [`SiteInfo`] aggregate,
//! inclusive integer rectangles, error types, and the per-site color
//! contract consumed by plotting front-ends.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod info;
pub mod rect;
pub mod value;

pub use color::{ColorSource, Rgb};
pub use error::LatticeError;
pub use info::{SiteInfo, SiteKind};
pub use rect::Rect;
pub use value::SiteValue;
