//! Data types carried by the lattice file format.

use crate::error::CodecError;

/// Which framing a file uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatVersion {
    /// `b"glZ2!"` followed by the value width and leaf radius.
    Current,
    /// `b"GLZ2!"`, no width/radius header.
    Legacy,
}

/// Decoded file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Framing of the file.
    pub version: FormatVersion,
    /// Byte width of a site value (`None` for legacy files).
    pub value_width: Option<u64>,
    /// Leaf radius `R` (`None` for legacy files).
    pub radius: Option<u64>,
}

/// Common header written before every square of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareHeader {
    /// X coordinate of the square's center.
    pub center_x: i64,
    /// Y coordinate of the square's center.
    pub center_y: i64,
    /// `1` for a leaf, otherwise the radius of each of the node's children.
    pub sub_radius: i64,
}

/// Tag byte describing one child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ChildTag {
    /// Uniformly empty subtree, nothing follows.
    Empty = 0,
    /// Uniformly full subtree, nothing follows.
    Full = 1,
    /// A leaf block follows.
    Leaf = 2,
    /// A node follows.
    Node = 3,
}

impl ChildTag {
    /// Decode a tag byte.
    pub fn from_u8(tag: u8) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Full),
            2 => Ok(Self::Leaf),
            3 => Ok(Self::Node),
            other => Err(CodecError::malformed(format!("invalid child tag {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_values_are_stable() {
        for tag in [ChildTag::Empty, ChildTag::Full, ChildTag::Leaf, ChildTag::Node] {
            assert_eq!(ChildTag::from_u8(tag as u8).unwrap(), tag);
        }
        assert_eq!(ChildTag::Leaf as u8, 2);
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = ChildTag::from_u8(4).unwrap_err();
        assert!(matches!(err, CodecError::MalformedTree { .. }));
    }
}
