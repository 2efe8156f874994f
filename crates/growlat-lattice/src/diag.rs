//! Introspection: memory accounting, tree dumps and the structural checker.

use std::error::Error;
use std::fmt;
use std::mem::size_of;

use growlat_arena::{LeafId, NodeId};
use growlat_core::{Rect, SiteInfo, SiteValue};

use crate::child::{Child, SquareRef, Status};
use crate::leaf::Leaf;
use crate::node::Node;
use crate::tree::{SquareTree, WalkStack};

/// Memory held by a lattice, counted square by square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryReport {
    /// Total bytes: the lattice object plus every node and leaf.
    pub bytes: u64,
    /// Number of allocated nodes.
    pub nodes: u64,
    /// Number of allocated leaves.
    pub leaves: u64,
    /// Depth of the tree (the root's level).
    pub depth: u32,
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes ({} MB) in {} nodes and {} leaves, depth {}",
            self.bytes,
            self.bytes / (1024 * 1024),
            self.nodes,
            self.leaves,
            self.depth
        )
    }
}

/// A broken structural invariant found by `check_invariants`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is not a parentless node centered at the origin.
    MisplacedRoot {
        /// What is wrong with it.
        detail: String,
    },
    /// A child's parent link, center or radius disagrees with its slot.
    BadLink {
        /// Which link is broken.
        detail: String,
    },
    /// A square whose sites are all empty or all full is still allocated.
    Uncompressed {
        /// Center of the square.
        center: (i64, i64),
        /// Radius of the square.
        radius: i64,
    },
    /// The root could shrink onto its center node but did not.
    RootNotMinimal {
        /// Radius of the root.
        radius: i64,
    },
    /// A leaf's counters disagree with its cells.
    LeafCounts {
        /// Center of the leaf.
        center: (i64, i64),
        /// Stored `(empty, full)` counters.
        stored: (u32, u32),
        /// Recounted `(empty, full)` values.
        actual: (u32, u32),
    },
    /// The global site counters disagree with the tree.
    Aggregate {
        /// Which counter is off.
        detail: String,
    },
    /// Squares are allocated but unreachable from the root.
    Leaked {
        /// Allocated nodes.
        nodes: usize,
        /// Nodes reachable from the root.
        reachable_nodes: usize,
        /// Allocated leaves.
        leaves: usize,
        /// Leaves reachable from the root.
        reachable_leaves: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MisplacedRoot { detail } => write!(f, "misplaced root: {detail}"),
            Self::BadLink { detail } => write!(f, "broken link: {detail}"),
            Self::Uncompressed { center, radius } => write!(
                f,
                "uniform square at ({},{}) radius {radius} was not compressed",
                center.0, center.1
            ),
            Self::RootNotMinimal { radius } => {
                write!(f, "root of radius {radius} only holds its center node")
            }
            Self::LeafCounts {
                center,
                stored,
                actual,
            } => write!(
                f,
                "leaf ({},{}) counts empty/full {}/{} but holds {}/{}",
                center.0, center.1, stored.0, stored.1, actual.0, actual.1
            ),
            Self::Aggregate { detail } => write!(f, "aggregate mismatch: {detail}"),
            Self::Leaked {
                nodes,
                reachable_nodes,
                leaves,
                reachable_leaves,
            } => write!(
                f,
                "{nodes} nodes ({reachable_nodes} reachable) and {leaves} leaves \
                 ({reachable_leaves} reachable) allocated"
            ),
        }
    }
}

impl Error for InvariantViolation {}

impl<T: SiteValue, const R: usize> SquareTree<T, R> {
    /// Bytes held by the tree and the number of squares in it.
    pub(crate) fn memory(&self) -> MemoryReport {
        let mut report = MemoryReport {
            depth: self.depth(SquareRef::Node(self.root())),
            ..MemoryReport::default()
        };
        let leaf_bytes = size_of::<Leaf<T, R>>() + Leaf::<T, R>::CELLS * size_of::<T>();
        let mut stack = WalkStack::new();
        stack.push(SquareRef::Node(self.root()));
        while let Some(sq) = stack.pop() {
            match sq {
                SquareRef::Leaf(_) => {
                    report.leaves += 1;
                    report.bytes += leaf_bytes as u64;
                }
                SquareRef::Node(id) => {
                    report.nodes += 1;
                    report.bytes += size_of::<Node>() as u64;
                    stack.extend(self.node(id).slots().filter_map(|(_, _, c)| c.square()));
                }
            }
        }
        report
    }

    /// Indented dump of the tree, one line per square or sentinel.
    pub(crate) fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.dump(SquareRef::Node(self.root()), "", "", &mut out);
        out
    }

    fn dump(&self, sq: SquareRef, first: &str, next: &str, out: &mut String) {
        match sq {
            SquareRef::Leaf(id) => {
                let leaf = self.leaf(id);
                out.push_str(&format!(
                    "{first}-> Leaf ({},{}) : empty = {} : full = {} : other = {}\n",
                    leaf.cx,
                    leaf.cy,
                    leaf.empty_cells,
                    leaf.full_cells,
                    leaf.other_cells()
                ));
            }
            SquareRef::Node(id) => {
                let node = self.node(id);
                out.push_str(&format!(
                    "{first}-> Node ({},{}) : radius = {}\n",
                    node.cx,
                    node.cy,
                    node.radius()
                ));
                for (i, j, child) in node.slots() {
                    let head = format!("{next}    |-[{i}][{j}] ");
                    match child {
                        Child::Empty => out.push_str(&format!("{head}-> Empty\n")),
                        Child::Full => out.push_str(&format!("{head}-> Full\n")),
                        Child::Leaf(_) | Child::Node(_) => {
                            let tail = format!("{next}    |        ");
                            if let Some(sub) = child.square() {
                                self.dump(sub, &head, &tail, out);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Walk the whole tree and verify links, geometry, compression, leaf
    /// counters and the global counters in `info`.
    pub(crate) fn check_invariants(&self, info: &SiteInfo<T>) -> Result<(), InvariantViolation> {
        let root = self.node(self.root());
        if root.parent.is_some() || root.cx != 0 || root.cy != 0 {
            return Err(InvariantViolation::MisplacedRoot {
                detail: format!(
                    "({},{}) with parent {:?}",
                    root.cx, root.cy, root.parent
                ),
            });
        }
        if !Self::is_node_sub_radius(root.sub_radius) {
            return Err(InvariantViolation::MisplacedRoot {
                detail: format!("sub-radius {} is not a node level", root.sub_radius),
            });
        }
        match root.status() {
            Status::Full => {
                return Err(InvariantViolation::Uncompressed {
                    center: (0, 0),
                    radius: root.radius(),
                })
            }
            Status::Empty if root.sub_radius != Self::RADIUS => {
                return Err(InvariantViolation::Uncompressed {
                    center: (0, 0),
                    radius: root.radius(),
                })
            }
            _ => {}
        }
        if root.sub_radius > Self::RADIUS
            && root.borders_empty()
            && matches!(root.children[1][1], Child::Node(_))
        {
            return Err(InvariantViolation::RootNotMinimal {
                radius: root.radius(),
            });
        }

        let mut tally = Tally::default();
        self.check_node(self.root(), info, &mut tally)?;

        if tally.nodes != self.node_count() || tally.leaves != self.leaf_count() {
            return Err(InvariantViolation::Leaked {
                nodes: self.node_count(),
                reachable_nodes: tally.nodes,
                leaves: self.leaf_count(),
                reachable_leaves: tally.leaves,
            });
        }
        if tally.non_empty != i128::from(info.non_empty) {
            return Err(InvariantViolation::Aggregate {
                detail: format!(
                    "{} non-empty sites recorded, {} in the tree",
                    info.non_empty, tally.non_empty
                ),
            });
        }
        if tally.full != i128::from(info.full_count) {
            return Err(InvariantViolation::Aggregate {
                detail: format!(
                    "{} full sites recorded, {} in the tree",
                    info.full_count, tally.full
                ),
            });
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        info: &SiteInfo<T>,
        tally: &mut Tally,
    ) -> Result<(), InvariantViolation> {
        tally.nodes += 1;
        let node = self.node(id);
        if node.parent.is_some() && node.status() != Status::Mixed {
            return Err(InvariantViolation::Uncompressed {
                center: (node.cx, node.cy),
                radius: node.radius(),
            });
        }
        let side = i128::from(2 * node.sub_radius + 1);
        for (i, j, child) in node.slots() {
            let expected = node.child_bounds(i, j);
            match child {
                Child::Empty => {}
                Child::Full => {
                    tally.non_empty += side * side;
                    tally.full += side * side;
                }
                Child::Leaf(leaf_id) => {
                    if node.sub_radius != Self::RADIUS {
                        return Err(bad_link(format!(
                            "{leaf_id} under node of sub-radius {}",
                            node.sub_radius
                        )));
                    }
                    self.check_leaf(leaf_id, id, expected, info, tally)?;
                }
                Child::Node(child_id) => {
                    let sub = self.node(child_id);
                    if sub.parent != Some(id) {
                        return Err(bad_link(format!(
                            "{child_id} points to {:?} instead of {id}",
                            sub.parent
                        )));
                    }
                    if sub.bounds() != expected {
                        return Err(bad_link(format!(
                            "{child_id} at ({},{}) sub-radius {} in slot [{i}][{j}] of {id}",
                            sub.cx, sub.cy, sub.sub_radius
                        )));
                    }
                    self.check_node(child_id, info, tally)?;
                }
            }
        }
        Ok(())
    }

    fn check_leaf(
        &self,
        id: LeafId,
        parent: NodeId,
        expected: Rect,
        info: &SiteInfo<T>,
        tally: &mut Tally,
    ) -> Result<(), InvariantViolation> {
        tally.leaves += 1;
        let leaf = self.leaf(id);
        if leaf.parent != parent || leaf.bounds() != expected {
            return Err(bad_link(format!(
                "{id} covering {} with parent {} expected to cover {expected} under {parent}",
                leaf.bounds(),
                leaf.parent
            )));
        }
        let center = (leaf.cx, leaf.cy);
        let actual = leaf.recount(info);
        if actual != (leaf.empty_cells, leaf.full_cells) {
            return Err(InvariantViolation::LeafCounts {
                center,
                stored: (leaf.empty_cells, leaf.full_cells),
                actual,
            });
        }
        if leaf.status() != Status::Mixed {
            return Err(InvariantViolation::Uncompressed {
                center,
                radius: Self::RADIUS,
            });
        }
        let cells = Leaf::<T, R>::CELLS as i128;
        tally.non_empty += cells - i128::from(leaf.empty_cells);
        tally.full += i128::from(leaf.full_cells);
        Ok(())
    }
}

fn bad_link(detail: String) -> InvariantViolation {
    InvariantViolation::BadLink { detail }
}

#[derive(Default)]
struct Tally {
    nodes: usize,
    leaves: usize,
    non_empty: i128,
    full: i128,
}
