//! Child slots, square handles and uniformity status.

use growlat_arena::{LeafId, NodeId};
use growlat_codec::ChildTag;

/// Content of one of the nine child slots of a node.
///
/// The two sentinel variants stand for a whole subtree whose sites all hold
/// the empty (resp. full) value. They are plain values: nothing is
/// allocated for them and two trees compare them by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Empty,
    Full,
    Leaf(LeafId),
    Node(NodeId),
}

impl Child {
    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        matches!(self, Child::Empty | Child::Full)
    }

    /// The square behind a real child.
    #[inline]
    pub(crate) fn square(self) -> Option<SquareRef> {
        match self {
            Child::Leaf(id) => Some(SquareRef::Leaf(id)),
            Child::Node(id) => Some(SquareRef::Node(id)),
            Child::Empty | Child::Full => None,
        }
    }

    /// The sentinel standing for a uniform subtree.
    ///
    /// # Panics
    ///
    /// Panics on [`Status::Mixed`].
    pub(crate) fn sentinel(status: Status) -> Child {
        match status {
            Status::Empty => Child::Empty,
            Status::Full => Child::Full,
            Status::Mixed => panic!("a mixed square has no sentinel"),
        }
    }

    pub(crate) fn tag(self) -> ChildTag {
        match self {
            Child::Empty => ChildTag::Empty,
            Child::Full => ChildTag::Full,
            Child::Leaf(_) => ChildTag::Leaf,
            Child::Node(_) => ChildTag::Node,
        }
    }
}

/// Handle to a real square of the tree: the unit of the access hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SquareRef {
    Node(NodeId),
    Leaf(LeafId),
}

/// Uniformity of a square.
///
/// For a node this only looks at sentinel occupancy of its own nine slots;
/// for a leaf it compares the cell counters with the block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Empty,
    Mixed,
    Full,
}
