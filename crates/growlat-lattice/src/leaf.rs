//! Leaf blocks: `(2R+1)²` sites stored directly.

use growlat_arena::NodeId;
use growlat_core::{Rect, SiteInfo, SiteKind, SiteValue};

use crate::child::Status;

/// A `(2R+1)×(2R+1)` block of sites centered at `(cx, cy)`.
///
/// Cells are indexed `[dx][dy]` with the x offset outer, which is also the
/// order they are written to disk. The two counters are kept exact by every
/// write; a leaf whose block is entirely empty or entirely full must be
/// replaced by the matching sentinel in its parent right away.
#[derive(Clone, Debug)]
pub(crate) struct Leaf<T, const R: usize> {
    pub(crate) cx: i64,
    pub(crate) cy: i64,
    /// Leaves always have a parent: the root is a node.
    pub(crate) parent: NodeId,
    pub(crate) cells: Box<[T]>,
    pub(crate) empty_cells: u32,
    pub(crate) full_cells: u32,
}

impl<T: SiteValue, const R: usize> Leaf<T, R> {
    pub(crate) const RADIUS: i64 = R as i64;
    pub(crate) const SIDE: usize = 2 * R + 1;
    pub(crate) const CELLS: usize = Self::SIDE * Self::SIDE;

    /// A leaf whose sites all hold `value`.
    pub(crate) fn uniform(cx: i64, cy: i64, parent: NodeId, value: T, info: &SiteInfo<T>) -> Self {
        let (empty_cells, full_cells) = match info.classify(value) {
            SiteKind::Empty => (Self::CELLS as u32, 0),
            SiteKind::Full => (0, Self::CELLS as u32),
            SiteKind::Other => (0, 0),
        };
        Self {
            cx,
            cy,
            parent,
            cells: vec![value; Self::CELLS].into_boxed_slice(),
            empty_cells,
            full_cells,
        }
    }

    /// Cell index of `(x, y)`, or `None` if the site lies outside the block.
    #[inline]
    pub(crate) fn offset(&self, x: i64, y: i64) -> Option<usize> {
        let dx = x.checked_sub(self.cx)?.checked_add(Self::RADIUS)?;
        let dy = y.checked_sub(self.cy)?.checked_add(Self::RADIUS)?;
        let side = Self::SIDE as i64;
        if (0..side).contains(&dx) && (0..side).contains(&dy) {
            Some(dx as usize * Self::SIDE + dy as usize)
        } else {
            None
        }
    }

    /// Cell index of a site known to lie in the block.
    #[inline]
    pub(crate) fn cell_index(&self, x: i64, y: i64) -> usize {
        match self.offset(x, y) {
            Some(off) => off,
            None => panic!(
                "site ({x},{y}) outside leaf centered at ({},{})",
                self.cx, self.cy
            ),
        }
    }

    pub(crate) fn status(&self) -> Status {
        if self.empty_cells as usize == Self::CELLS {
            Status::Empty
        } else if self.full_cells as usize == Self::CELLS {
            Status::Full
        } else {
            Status::Mixed
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::centered(self.cx, self.cy, Self::RADIUS)
    }

    /// Number of cells that are neither empty nor full.
    pub(crate) fn other_cells(&self) -> usize {
        Self::CELLS - self.empty_cells as usize - self.full_cells as usize
    }

    /// Recount the cells against the sentinels: `(empty, full)`.
    pub(crate) fn recount(&self, info: &SiteInfo<T>) -> (u32, u32) {
        self.cells
            .iter()
            .fold((0, 0), |(e, f), &v| match info.classify(v) {
                SiteKind::Empty => (e + 1, f),
                SiteKind::Full => (e, f + 1),
                SiteKind::Other => (e, f),
            })
    }

    /// Same position, counters and cells.
    pub(crate) fn same_as(&self, other: &Self) -> bool {
        self.cx == other.cx
            && self.cy == other.cy
            && self.empty_cells == other.empty_cells
            && self.full_cells == other.full_cells
            && self.cells == other.cells
    }
}
