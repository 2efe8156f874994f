//! Node squares: a 3×3 array of child slots.

use growlat_arena::NodeId;
use growlat_core::Rect;

use crate::child::{Child, Status};

/// A node centered at `(cx, cy)` whose nine children each have radius
/// `sub_radius`; its own radius is `3 * sub_radius + 1`.
///
/// Children are indexed `[i][j]`, `i` along x and `j` along y, `0` being
/// the low side.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) cx: i64,
    pub(crate) cy: i64,
    pub(crate) sub_radius: i64,
    /// `None` iff this node is the root.
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [[Child; 3]; 3],
}

impl Node {
    /// A node whose nine slots all hold the same sentinel.
    pub(crate) fn uniform(
        cx: i64,
        cy: i64,
        sub_radius: i64,
        parent: Option<NodeId>,
        fill: Child,
    ) -> Self {
        debug_assert!(fill.is_sentinel());
        Self {
            cx,
            cy,
            sub_radius,
            parent,
            children: [[fill; 3]; 3],
        }
    }

    /// The all-empty root at level 1: centered at the origin, leaf children.
    pub(crate) fn initial_root(leaf_radius: i64) -> Self {
        Self::uniform(0, 0, leaf_radius, None, Child::Empty)
    }

    #[inline]
    pub(crate) fn radius(&self) -> i64 {
        3 * self.sub_radius + 1
    }

    #[inline]
    pub(crate) fn contains(&self, x: i64, y: i64) -> bool {
        let rad = self.radius().unsigned_abs();
        x.abs_diff(self.cx) <= rad && y.abs_diff(self.cy) <= rad
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::centered(self.cx, self.cy, self.radius())
    }

    #[inline]
    fn slot(center: i64, sub_radius: i64, z: i64) -> usize {
        let d = z - center;
        if d < -sub_radius {
            0
        } else if d > sub_radius {
            2
        } else {
            1
        }
    }

    /// Slot `(i, j)` of the child covering `(x, y)`.
    #[inline]
    pub(crate) fn slot_of(&self, x: i64, y: i64) -> (usize, usize) {
        (
            Self::slot(self.cx, self.sub_radius, x),
            Self::slot(self.cy, self.sub_radius, y),
        )
    }

    #[inline]
    pub(crate) fn child_at(&self, x: i64, y: i64) -> Child {
        let (i, j) = self.slot_of(x, y);
        self.children[i][j]
    }

    #[inline]
    fn offset(&self, k: usize) -> i64 {
        (k as i64 - 1) * (2 * self.sub_radius + 1)
    }

    /// Center of the child in slot `(i, j)`.
    pub(crate) fn child_center(&self, i: usize, j: usize) -> (i64, i64) {
        (self.cx + self.offset(i), self.cy + self.offset(j))
    }

    /// Sites covered by the child in slot `(i, j)`.
    pub(crate) fn child_bounds(&self, i: usize, j: usize) -> Rect {
        let (cx, cy) = self.child_center(i, j);
        Rect::centered(cx, cy, self.sub_radius)
    }

    /// Sentinel occupancy of the nine slots; children are not inspected.
    pub(crate) fn status(&self) -> Status {
        let mut slots = self.children.iter().flatten();
        let first = match slots.next() {
            Some(c) => *c,
            None => return Status::Mixed,
        };
        let status = match first {
            Child::Empty => Status::Empty,
            Child::Full => Status::Full,
            _ => return Status::Mixed,
        };
        if slots.all(|c| *c == first) {
            status
        } else {
            Status::Mixed
        }
    }

    /// Whether the eight border slots are all the empty sentinel.
    pub(crate) fn borders_empty(&self) -> bool {
        self.children.iter().enumerate().all(|(i, row)| {
            row.iter()
                .enumerate()
                .all(|(j, c)| (i == 1 && j == 1) || *c == Child::Empty)
        })
    }

    /// Iterate over `(i, j, child)` in row-major order, `i` outer.
    pub(crate) fn slots(&self) -> impl Iterator<Item = (usize, usize, Child)> + '_ {
        self.children
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, c)| (i, j, *c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growlat_arena::LeafId;

    #[test]
    fn radius_and_slots() {
        let n = Node::initial_root(5);
        assert_eq!(n.radius(), 16);
        assert!(n.contains(16, -16));
        assert!(!n.contains(17, 0));
        assert!(!n.contains(i64::MIN, 0));
        assert!(!n.contains(0, i64::MAX));
        assert_eq!(n.slot_of(0, 0), (1, 1));
        assert_eq!(n.slot_of(-6, 5), (0, 1));
        assert_eq!(n.slot_of(6, -5), (2, 1));
        assert_eq!(n.slot_of(16, -16), (2, 0));
    }

    #[test]
    fn child_centers_tile_the_node() {
        let n = Node::uniform(100, -50, 16, None, Child::Empty);
        assert_eq!(n.child_center(0, 2), (100 - 33, -50 + 33));
        assert_eq!(n.child_bounds(1, 1), Rect::new(84, 116, -66, -34));
        assert_eq!(n.child_bounds(0, 0).x_max + 1, n.child_bounds(1, 0).x_min);
        assert_eq!(n.child_bounds(2, 2).x_max, n.bounds().x_max);
        for (i, j, _) in n.slots() {
            let (cx, cy) = n.child_center(i, j);
            assert_eq!(n.slot_of(cx, cy), (i, j));
        }
    }

    #[test]
    fn status_checks_only_sentinels() {
        let mut n = Node::initial_root(2);
        assert_eq!(n.status(), Status::Empty);
        n.children = [[Child::Full; 3]; 3];
        assert_eq!(n.status(), Status::Full);
        n.children[2][1] = Child::Empty;
        assert_eq!(n.status(), Status::Mixed);
        n.children = [[Child::Full; 3]; 3];
        n.children[0][0] = Child::Leaf(LeafId(0));
        assert_eq!(n.status(), Status::Mixed);
    }

    #[test]
    fn borders_ignore_center() {
        let mut n = Node::initial_root(2);
        n.children[1][1] = Child::Full;
        assert!(n.borders_empty());
        n.children[0][1] = Child::Full;
        assert!(!n.borders_empty());
    }
}
