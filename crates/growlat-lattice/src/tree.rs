//! The square tree: arena storage plus the lookup, write and compression
//! algorithms.
//!
//! Every level of the tree multiplies the covered radius by three: a node
//! with children of radius `s` has radius `3s + 1`. Level-1 nodes hold
//! leaves (`s = R`), higher nodes hold nodes. The root is always centered
//! at the origin; it grows outward by wrapping itself in a new parent and
//! zooms back in when everything outside its center child is empty.
//!
//! Uniform subtrees never stay allocated. A write that makes a leaf
//! entirely empty or entirely full replaces it with a sentinel in its
//! parent and walks up, collapsing every ancestor that became uniform.

use growlat_arena::{ArenaConfig, LeafId, NodeId, Slab};
use growlat_core::{SiteInfo, SiteKind, SiteValue};
use log::trace;
use smallvec::SmallVec;

use crate::child::{Child, SquareRef, Status};
use crate::leaf::Leaf;
use crate::node::Node;

/// Depth-first work stack; deep trees are rare, 32 entries covers them.
pub(crate) type WalkStack = SmallVec<[SquareRef; 32]>;

/// Arena-backed 3×3 square tree with leaves of radius `R`.
pub(crate) struct SquareTree<T, const R: usize> {
    pub(crate) nodes: Slab<NodeId, Node>,
    pub(crate) leaves: Slab<LeafId, Leaf<T, R>>,
    pub(crate) root: NodeId,
    config: ArenaConfig,
}

impl<T: SiteValue, const R: usize> SquareTree<T, R> {
    pub(crate) const RADIUS: i64 = R as i64;

    /// Largest child radius a node may have: its own radius `3s + 1` must
    /// stay representable.
    pub(crate) const MAX_SUB_RADIUS: i64 = (i64::MAX - 1) / 3;

    /// A tree holding only the initial all-empty root.
    pub(crate) fn new(config: ArenaConfig) -> Self {
        let mut tree = Self::unrooted(config);
        tree.root = tree.nodes.insert(Node::initial_root(Self::RADIUS));
        tree
    }

    /// Empty arenas; `root` must be installed before the tree is used.
    pub(crate) fn unrooted(config: ArenaConfig) -> Self {
        Self {
            nodes: Slab::with_capacity(config.node_capacity),
            leaves: Slab::with_capacity(config.leaf_capacity),
            root: NodeId(0),
            config,
        }
    }

    pub(crate) fn config(&self) -> ArenaConfig {
        self.config
    }

    #[inline]
    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn leaf(&self, id: LeafId) -> &Leaf<T, R> {
        &self.leaves[id]
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Walk parent links up to the root.
    pub(crate) fn root_of(&self, sq: SquareRef) -> NodeId {
        let mut id = match sq {
            SquareRef::Node(id) => id,
            SquareRef::Leaf(id) => self.leaves[id].parent,
        };
        while let Some(parent) = self.nodes[id].parent {
            id = parent;
        }
        id
    }

    /// Level of a square: leaves are at 0, nodes with leaf children at 1.
    pub(crate) fn depth(&self, sq: SquareRef) -> u32 {
        match sq {
            SquareRef::Leaf(_) => 0,
            SquareRef::Node(id) => {
                let mut depth = 1;
                let mut r = self.nodes[id].sub_radius;
                while r > Self::RADIUS {
                    depth += 1;
                    r = (r - 1) / 3;
                }
                depth
            }
        }
    }

    /// Whether `r` is the child radius of some node level.
    pub(crate) fn is_node_sub_radius(mut r: i64) -> bool {
        while r > Self::RADIUS {
            if (r - 1) % 3 != 0 {
                return false;
            }
            r = (r - 1) / 3;
        }
        r == Self::RADIUS
    }

    fn free_node(&mut self, id: NodeId) -> Node {
        match self.nodes.remove(id) {
            Some(node) => node,
            None => panic!("freeing stale {id}"),
        }
    }

    fn free_leaf(&mut self, id: LeafId) -> Leaf<T, R> {
        match self.leaves.remove(id) {
            Some(leaf) => leaf,
            None => panic!("freeing stale {id}"),
        }
    }

    /// Release every square reachable from the root, leaving the arenas
    /// without a root.
    fn destroy_tree(&mut self) {
        let mut stack = WalkStack::new();
        stack.push(SquareRef::Node(self.root));
        while let Some(sq) = stack.pop() {
            match sq {
                SquareRef::Leaf(id) => {
                    self.free_leaf(id);
                }
                SquareRef::Node(id) => {
                    let node = self.free_node(id);
                    stack.extend(node.slots().filter_map(|(_, _, c)| c.square()));
                }
            }
        }
        debug_assert!(
            self.nodes.is_empty() && self.leaves.is_empty(),
            "squares unreachable from the root were leaked"
        );
    }

    /// Drop the whole tree and install a fresh all-empty root.
    pub(crate) fn reset(&mut self) {
        self.destroy_tree();
        self.nodes = Slab::with_capacity(self.config.node_capacity);
        self.leaves = Slab::with_capacity(self.config.leaf_capacity);
        self.root = self.nodes.insert(Node::initial_root(Self::RADIUS));
    }

    /// Value at `(x, y)` and the square where the lookup ended.
    ///
    /// The hint is tried first; when it is a leaf covering the site this
    /// is a single offset computation.
    #[inline]
    pub(crate) fn get(&self, x: i64, y: i64, hint: SquareRef, info: &SiteInfo<T>) -> (T, SquareRef) {
        if let SquareRef::Leaf(id) = hint {
            let leaf = &self.leaves[id];
            if let Some(off) = leaf.offset(x, y) {
                return (leaf.cells[off], hint);
            }
        }
        self.get_slow(x, y, hint, info)
    }

    fn get_slow(&self, x: i64, y: i64, hint: SquareRef, info: &SiteInfo<T>) -> (T, SquareRef) {
        let mut id = match hint {
            SquareRef::Node(id) => id,
            SquareRef::Leaf(id) => self.leaves[id].parent,
        };
        // Climb until the site is covered; past the root it is empty.
        while !self.nodes[id].contains(x, y) {
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => return (info.empty, SquareRef::Node(id)),
            }
        }
        loop {
            match self.nodes[id].child_at(x, y) {
                Child::Empty => return (info.empty, SquareRef::Node(id)),
                Child::Full => return (info.full, SquareRef::Node(id)),
                Child::Node(child) => id = child,
                Child::Leaf(leaf_id) => {
                    let leaf = &self.leaves[leaf_id];
                    return (leaf.cells[leaf.cell_index(x, y)], SquareRef::Leaf(leaf_id));
                }
            }
        }
    }

    /// Store `v` at `(x, y)`, returning the new hint.
    ///
    /// The site counters in `info` are updated; the bounding box is the
    /// caller's business.
    #[inline]
    pub(crate) fn set(
        &mut self,
        v: T,
        x: i64,
        y: i64,
        hint: SquareRef,
        info: &mut SiteInfo<T>,
    ) -> SquareRef {
        if let SquareRef::Leaf(id) = hint {
            if let Some(off) = self.leaves[id].offset(x, y) {
                return self.write_cell(id, off, v, info);
            }
        }
        self.set_slow(v, x, y, hint, info)
    }

    fn set_slow(
        &mut self,
        v: T,
        x: i64,
        y: i64,
        hint: SquareRef,
        info: &mut SiteInfo<T>,
    ) -> SquareRef {
        let (current, mut sq) = self.get_slow(x, y, hint, info);
        if current == v {
            return sq;
        }
        if let SquareRef::Node(id) = sq {
            if self.nodes[id].parent.is_none() {
                let mut root = id;
                while !self.nodes[root].contains(x, y) {
                    root = self.create_father(root);
                }
                sq = SquareRef::Node(root);
            }
        }
        let leaf = loop {
            match sq {
                SquareRef::Leaf(id) => break id,
                SquareRef::Node(id) => {
                    let (i, j) = self.nodes[id].slot_of(x, y);
                    let child = match self.nodes[id].children[i][j] {
                        Child::Empty | Child::Full => self.create_child(id, i, j, info),
                        real => real,
                    };
                    sq = match child.square() {
                        Some(next) => next,
                        None => unreachable!("create_child returned a sentinel"),
                    };
                }
            }
        };
        let off = self.leaves[leaf].cell_index(x, y);
        self.write_cell(leaf, off, v, info)
    }

    /// Write one leaf cell, keeping both the leaf and global counters exact.
    ///
    /// A leaf left uniform is removed and the returned hint is the node
    /// where cleaning stopped.
    fn write_cell(&mut self, id: LeafId, off: usize, v: T, info: &mut SiteInfo<T>) -> SquareRef {
        let leaf = &mut self.leaves[id];
        let old = leaf.cells[off];
        if old == v {
            return SquareRef::Leaf(id);
        }
        match info.classify(old) {
            SiteKind::Empty => {
                leaf.empty_cells -= 1;
                info.non_empty += 1;
            }
            SiteKind::Full => {
                leaf.full_cells -= 1;
                info.full_count -= 1;
            }
            SiteKind::Other => {}
        }
        match info.classify(v) {
            SiteKind::Empty => {
                leaf.empty_cells += 1;
                info.non_empty -= 1;
            }
            SiteKind::Full => {
                leaf.full_cells += 1;
                info.full_count += 1;
            }
            SiteKind::Other => {}
        }
        leaf.cells[off] = v;
        if leaf.status() == Status::Mixed {
            SquareRef::Leaf(id)
        } else {
            self.leaf_remove(id)
        }
    }

    /// Replace a uniform leaf by its sentinel and clean upward.
    fn leaf_remove(&mut self, id: LeafId) -> SquareRef {
        let leaf = self.free_leaf(id);
        let fill = Child::sentinel(leaf.status());
        let parent = leaf.parent;
        let (i, j) = self.nodes[parent].slot_of(leaf.cx, leaf.cy);
        self.nodes[parent].children[i][j] = fill;
        SquareRef::Node(self.clean(parent))
    }

    /// Restore compression at `id` after one of its slots changed and
    /// return the square where the walk ended.
    ///
    /// A uniform non-root node becomes a sentinel in its parent, which is
    /// cleaned in turn. The root grows if it turned full, is replaced by a
    /// fresh root if it turned empty, and zooms in on its center node when
    /// the eight border slots are empty.
    fn clean(&mut self, id: NodeId) -> NodeId {
        let node = &self.nodes[id];
        let status = node.status();
        let (cx, cy, parent) = (node.cx, node.cy, node.parent);
        let zoom_target = match node.children[1][1] {
            Child::Node(center) if node.sub_radius > Self::RADIUS && node.borders_empty() => {
                Some(center)
            }
            _ => None,
        };
        if let Some(parent) = parent {
            if status == Status::Mixed {
                return id;
            }
            let (i, j) = self.nodes[parent].slot_of(cx, cy);
            self.nodes[parent].children[i][j] = Child::sentinel(status);
            self.free_node(id);
            return self.clean(parent);
        }
        match status {
            Status::Full => self.create_father(id),
            Status::Empty => {
                self.free_node(id);
                self.root = self.nodes.insert(Node::initial_root(Self::RADIUS));
                trace!("lattice emptied, root reset to radius {}", 3 * R + 1);
                self.root
            }
            Status::Mixed => match zoom_target {
                Some(center) => {
                    self.free_node(id);
                    self.nodes[center].parent = None;
                    self.root = center;
                    trace!("lattice root shrank to radius {}", self.nodes[center].radius());
                    self.clean(center)
                }
                None => id,
            },
        }
    }

    /// Wrap the root in a new root three times as wide.
    fn create_father(&mut self, id: NodeId) -> NodeId {
        let node = &self.nodes[id];
        assert!(
            node.parent.is_none() && node.cx == 0 && node.cy == 0,
            "only the root centered at the origin can grow"
        );
        let status = node.status();
        let sub_radius = node.radius();
        assert!(
            sub_radius <= Self::MAX_SUB_RADIUS,
            "lattice coordinates exceed the representable range"
        );
        let father = self
            .nodes
            .insert(Node::uniform(0, 0, sub_radius, None, Child::Empty));
        let center = match status {
            Status::Mixed => {
                self.nodes[id].parent = Some(father);
                Child::Node(id)
            }
            uniform => {
                self.free_node(id);
                Child::sentinel(uniform)
            }
        };
        self.nodes[father].children[1][1] = center;
        self.root = father;
        trace!("lattice root grew to radius {}", self.nodes[father].radius());
        father
    }

    /// Materialize the sentinel in slot `(i, j)` of `id` as a real square
    /// filled with the sentinel's value.
    fn create_child(&mut self, id: NodeId, i: usize, j: usize, info: &SiteInfo<T>) -> Child {
        let node = &self.nodes[id];
        let fill = node.children[i][j];
        assert!(fill.is_sentinel(), "slot [{i}][{j}] of {id} is already a square");
        let (cx, cy) = node.child_center(i, j);
        let sub_radius = node.sub_radius;
        let child = if sub_radius == Self::RADIUS {
            let value = if fill == Child::Empty { info.empty } else { info.full };
            Child::Leaf(self.leaves.insert(Leaf::uniform(cx, cy, id, value, info)))
        } else {
            Child::Node(self.nodes.insert(Node::uniform(
                cx,
                cy,
                (sub_radius - 1) / 3,
                Some(id),
                fill,
            )))
        };
        self.nodes[id].children[i][j] = child;
        child
    }

    /// Structural equality: same shape, geometry, sentinels and leaf data.
    pub(crate) fn same_as(&self, other: &Self) -> bool {
        self.same_node(self.root, other, other.root)
    }

    fn same_node(&self, a: NodeId, other: &Self, b: NodeId) -> bool {
        let (na, nb) = (&self.nodes[a], &other.nodes[b]);
        if na.parent.is_none() != nb.parent.is_none()
            || (na.cx, na.cy, na.sub_radius) != (nb.cx, nb.cy, nb.sub_radius)
        {
            return false;
        }
        na.slots().zip(nb.slots()).all(|((_, _, ca), (_, _, cb))| match (ca, cb) {
            (Child::Empty, Child::Empty) | (Child::Full, Child::Full) => true,
            (Child::Leaf(la), Child::Leaf(lb)) => self.leaves[la].same_as(&other.leaves[lb]),
            (Child::Node(ca), Child::Node(cb)) => self.same_node(ca, other, cb),
            _ => false,
        })
    }

    fn copy_node(&self, id: NodeId, parent: Option<NodeId>, out: &mut Self) -> NodeId {
        let src = &self.nodes[id];
        let copy = out.nodes.insert(Node {
            parent,
            children: [[Child::Empty; 3]; 3],
            ..src.clone()
        });
        for (i, j, child) in src.slots() {
            let copied = match child {
                Child::Leaf(leaf_id) => {
                    let mut leaf = self.leaves[leaf_id].clone();
                    leaf.parent = copy;
                    Child::Leaf(out.leaves.insert(leaf))
                }
                Child::Node(node_id) => Child::Node(self.copy_node(node_id, Some(copy), out)),
                sentinel => sentinel,
            };
            out.nodes[copy].children[i][j] = copied;
        }
        copy
    }
}

/// Deep copy into fresh, compacted arenas.
impl<T: SiteValue, const R: usize> Clone for SquareTree<T, R> {
    fn clone(&self) -> Self {
        let mut out = Self::unrooted(ArenaConfig::new(
            self.config.node_capacity.max(self.nodes.len()),
            self.config.leaf_capacity.max(self.leaves.len()),
        ));
        out.config = self.config;
        out.root = self.copy_node(self.root, None, &mut out);
        out
    }
}
