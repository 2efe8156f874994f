//! The per-lattice [`SiteInfo`] aggregate.

use crate::rect::Rect;
use crate::value::SiteValue;

/// Classification of a site value against the two sentinels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// The value equals the empty sentinel.
    Empty,
    /// The value equals the full sentinel.
    Full,
    /// Any other value.
    Other,
}

/// Sentinel values and running aggregates of one lattice.
///
/// The counters are exact over the current tree. The bounding box is
/// monotonic: it grows whenever a non-empty value is written and is never
/// contracted when sites are cleared back to empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteInfo<T> {
    /// Value of every site that was never written.
    pub empty: T,
    /// Value that marks a full site; uniform full blocks are compressed.
    pub full: T,
    /// Number of sites whose value differs from `empty`.
    pub non_empty: i64,
    /// Number of sites whose value equals `full`.
    pub full_count: i64,
    /// Rectangle containing every non-empty site ever written.
    ///
    /// Meaningless while `non_empty == 0`.
    pub bbox: Rect,
}

impl<T: SiteValue> SiteInfo<T> {
    /// Fresh aggregate for an all-empty lattice.
    pub fn new(empty: T, full: T) -> Self {
        Self {
            empty,
            full,
            non_empty: 0,
            full_count: 0,
            bbox: Rect::default(),
        }
    }

    /// Zero the counters and the bounding box, keeping the sentinels.
    pub fn clear_counts(&mut self) {
        self.non_empty = 0;
        self.full_count = 0;
        self.bbox = Rect::default();
    }

    /// Classify `v` against the sentinels.
    #[inline]
    pub fn classify(&self, v: T) -> SiteKind {
        if v == self.empty {
            SiteKind::Empty
        } else if v == self.full {
            SiteKind::Full
        } else {
            SiteKind::Other
        }
    }

    /// Record a write of the non-empty value at `(x, y)` in the bounding box.
    ///
    /// The first non-empty site initializes the box.
    pub fn record_non_empty(&mut self, x: i64, y: i64) {
        if self.non_empty == 0 {
            self.bbox = Rect::point(x, y);
        } else {
            self.bbox.expand_to(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_against_sentinels() {
        let info = SiteInfo::new(0u8, 1u8);
        assert_eq!(info.classify(0), SiteKind::Empty);
        assert_eq!(info.classify(1), SiteKind::Full);
        assert_eq!(info.classify(7), SiteKind::Other);
    }

    #[test]
    fn first_record_initializes_bbox() {
        let mut info = SiteInfo::new(0i32, -1i32);
        info.record_non_empty(5, 7);
        assert_eq!(info.bbox, Rect::point(5, 7));
        info.non_empty = 1;
        info.record_non_empty(-2, 9);
        assert_eq!(info.bbox, Rect::new(-2, 5, 7, 9));
    }

    #[test]
    fn clear_keeps_sentinels() {
        let mut info = SiteInfo::new(3u16, 4u16);
        info.non_empty = 10;
        info.full_count = 2;
        info.clear_counts();
        assert_eq!(info, SiteInfo::new(3u16, 4u16));
    }
}
