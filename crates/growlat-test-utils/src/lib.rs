//! Test utilities for growlat development.
//!
//! Provides a [`ReferenceLattice`] (a plain map from site to value) that the
//! compressed lattice is checked against, seeded fixtures for randomized
//! scenarios, and assertion helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use growlat_core::{Rect, SiteValue};
use growlat_lattice::GrowingLattice;
use indexmap::IndexMap;

/// Uncompressed model of a lattice: only non-empty sites are stored.
///
/// Insertion order is kept so that failures replay deterministically.
#[derive(Clone, Debug)]
pub struct ReferenceLattice<T> {
    empty: T,
    full: T,
    sites: IndexMap<(i64, i64), T>,
    bbox: Option<Rect>,
}

impl<T: SiteValue> ReferenceLattice<T> {
    pub fn new(empty: T, full: T) -> Self {
        Self {
            empty,
            full,
            sites: IndexMap::new(),
            bbox: None,
        }
    }

    pub fn get(&self, x: i64, y: i64) -> T {
        self.sites.get(&(x, y)).copied().unwrap_or(self.empty)
    }

    /// Store `v`, tracking the never-shrinking bounding box the way the
    /// lattice does.
    pub fn set(&mut self, v: T, x: i64, y: i64) {
        if v == self.empty {
            self.sites.shift_remove(&(x, y));
        } else {
            if self.sites.is_empty() {
                self.bbox = Some(Rect::point(x, y));
            } else if let Some(b) = &mut self.bbox {
                b.expand_to(x, y);
            }
            self.sites.insert((x, y), v);
        }
    }

    pub fn non_empty_count(&self) -> i64 {
        self.sites.len() as i64
    }

    pub fn full_count(&self) -> i64 {
        self.sites.values().filter(|&&v| v == self.full).count() as i64
    }

    pub fn range(&self) -> Option<Rect> {
        if self.sites.is_empty() {
            None
        } else {
            self.bbox
        }
    }

    /// Non-empty sites in insertion order.
    pub fn sites(&self) -> impl Iterator<Item = ((i64, i64), T)> + '_ {
        self.sites.iter().map(|(&k, &v)| (k, v))
    }
}

/// Assert that `lattice` agrees with `model` on every stored site, on the
/// whole of `window`, and on the counters and bounding box.
pub fn assert_matches_reference<T: SiteValue, const R: usize>(
    lattice: &GrowingLattice<T, R>,
    model: &ReferenceLattice<T>,
    window: Rect,
) {
    for ((x, y), v) in model.sites() {
        assert_eq!(lattice.get(x, y), v, "site ({x},{y})");
    }
    for x in window.x_min..=window.x_max {
        for y in window.y_min..=window.y_max {
            assert_eq!(lattice.get(x, y), model.get(x, y), "site ({x},{y})");
        }
    }
    assert_eq!(lattice.non_empty_count(), model.non_empty_count(), "non-empty count");
    assert_eq!(lattice.full_count(), model.full_count(), "full count");
    assert_eq!(lattice.range(), model.range(), "bounding box");
    if let Err(violation) = lattice.check_invariants() {
        panic!("invariant violated: {violation}");
    }
}
