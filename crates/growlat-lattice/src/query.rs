//! Rectangles of full sites around a given site.

use growlat_core::{Rect, SiteInfo, SiteValue};

use crate::child::SquareRef;
use crate::tree::SquareTree;

impl<T: SiteValue, const R: usize> SquareTree<T, R> {
    /// The full block containing `(x, y)`: the site itself when it lives in
    /// a leaf, the whole sentinel square otherwise. `None` if the site is
    /// not full.
    ///
    /// `hint` is updated like a lookup would.
    pub(crate) fn enclosing_rect_full(
        &self,
        x: i64,
        y: i64,
        hint: &mut SquareRef,
        info: &SiteInfo<T>,
    ) -> Option<Rect> {
        let (v, sq) = self.get(x, y, *hint, info);
        *hint = sq;
        if v != info.full {
            return None;
        }
        match sq {
            SquareRef::Leaf(_) => Some(Rect::point(x, y)),
            SquareRef::Node(id) => {
                let node = self.node(id);
                let (i, j) = node.slot_of(x, y);
                Some(node.child_bounds(i, j))
            }
        }
    }

    /// Grow the block of [`enclosing_rect_full`](Self::enclosing_rect_full)
    /// into a larger rectangle of full sites by probing the neighboring full
    /// blocks along each border and at each corner.
    ///
    /// The result always contains the basic block and only full sites.
    /// A site stored in a leaf is returned as is.
    pub(crate) fn improved_enclosing_rect_full(
        &self,
        x: i64,
        y: i64,
        hint: &mut SquareRef,
        info: &SiteInfo<T>,
    ) -> Option<Rect> {
        let base = self.enclosing_rect_full(x, y, hint, info)?;
        if matches!(*hint, SquareRef::Leaf(_)) {
            return Some(base);
        }
        let Rect {
            x_min,
            x_max,
            y_min,
            y_max,
        } = base;
        let mut p = *hint;
        let full_at =
            |px: i64, py: i64, p: &mut SquareRef| self.enclosing_rect_full(px, py, p, info);

        // down-left corner
        let (mut c_down, mut c_left) = (y_min, x_min);
        if let Some(b) = full_at(x_min - 1, y_min - 1, &mut p) {
            c_down = b.y_min;
            c_left = b.x_min;
        }
        let lower_left = p;

        // left border, sliding up
        let mut left = x_min;
        if let Some(mut b) = full_at(x_min - 1, y_min, &mut p) {
            left = b.x_min;
            while left < x_min - 1 && b.y_max < y_max {
                match full_at(x_min - 1, b.y_max + 1, &mut p) {
                    Some(nb) => {
                        left = left.max(nb.x_min);
                        b = nb;
                    }
                    None => left = x_min,
                }
            }
            if left >= x_min - 1 {
                left = x_min;
            }
        }

        // up-left corner
        let (mut a_up, mut a_left) = (y_max, x_min);
        if let Some(b) = full_at(x_min - 1, y_max + 1, &mut p) {
            a_up = b.y_max;
            a_left = b.x_min;
        }

        // up border, sliding right
        let mut up = y_max;
        if let Some(mut b) = full_at(x_min, y_max + 1, &mut p) {
            up = b.y_max;
            while up > y_max + 1 && b.x_max < x_max {
                match full_at(b.x_max + 1, y_max + 1, &mut p) {
                    Some(nb) => {
                        up = up.min(nb.y_max);
                        b = nb;
                    }
                    None => up = y_max,
                }
            }
            if up <= y_max + 1 {
                up = y_max;
            }
        }

        // up-right corner
        let (mut b_up, mut b_right) = (y_max, x_max);
        if let Some(b) = full_at(x_max + 1, y_max + 1, &mut p) {
            b_up = b.y_max;
            b_right = b.x_max;
        }

        // down border, sliding right from the lower-left corner
        p = lower_left;
        let mut down = y_min;
        if let Some(mut b) = full_at(x_min, y_min - 1, &mut p) {
            down = b.y_min;
            while down < y_min - 1 && b.x_max < x_max {
                match full_at(b.x_max + 1, y_min - 1, &mut p) {
                    Some(nb) => {
                        down = down.max(nb.y_min);
                        b = nb;
                    }
                    None => down = y_min,
                }
            }
            if down >= y_min - 1 {
                down = y_min;
            }
        }

        // down-right corner
        let (mut d_down, mut d_right) = (y_min, x_max);
        if let Some(b) = full_at(x_max + 1, y_min - 1, &mut p) {
            d_down = b.y_min;
            d_right = b.x_max;
        }

        // right border, sliding up
        let mut right = x_max;
        if let Some(mut b) = full_at(x_max + 1, y_min, &mut p) {
            right = b.x_max;
            while right > x_max + 1 && b.y_max < y_max {
                match full_at(x_max + 1, b.y_max + 1, &mut p) {
                    Some(nb) => {
                        right = right.min(nb.x_max);
                        b = nb;
                    }
                    None => right = x_max,
                }
            }
            if right <= x_max + 1 {
                right = x_max;
            }
        }

        // A corner only constrains the directions that actually extend.
        if up == y_max {
            a_left = left;
            b_right = right;
        }
        if down == y_min {
            c_left = left;
            d_right = right;
        }
        if left == x_min {
            a_up = up;
            c_down = down;
        }
        if right == x_max {
            b_up = up;
            d_down = down;
        }

        Some(Rect::new(
            a_left.max(left).max(c_left),
            b_right.min(right).min(d_right),
            c_down.max(down).max(d_down),
            a_up.min(up).min(b_up),
        ))
    }
}
