//! Reusable lattice fixtures.
//!
//! - [`fill_rect`]: write one value over a whole rectangle.
//! - [`disk`]: a full disk with a ring of "other" values around it.
//! - [`random_walk`]: a reproducible walk writing random values.

use growlat_core::{Rect, SiteValue};
use growlat_lattice::GrowingLattice;
use rand::Rng;

use crate::ReferenceLattice;

/// Write `v` on every site of `rect`, x outer.
pub fn fill_rect<T: SiteValue, const R: usize>(lattice: &mut GrowingLattice<T, R>, rect: Rect, v: T) {
    for x in rect.x_min..=rect.x_max {
        for y in rect.y_min..=rect.y_max {
            lattice.set(v, x, y);
        }
    }
}

/// Full disk of the given radius centered at `(cx, cy)`, bordered by a
/// one-site ring of `ring`.
pub fn disk<T: SiteValue, const R: usize>(
    lattice: &mut GrowingLattice<T, R>,
    cx: i64,
    cy: i64,
    radius: i64,
    ring: T,
) {
    let full = lattice.full_value();
    let r2 = radius * radius;
    let outer2 = (radius + 1) * (radius + 1);
    for x in cx - radius - 1..=cx + radius + 1 {
        for y in cy - radius - 1..=cy + radius + 1 {
            let d2 = (x - cx) * (x - cx) + (y - cy) * (y - cy);
            if d2 <= r2 {
                lattice.set(full, x, y);
            } else if d2 <= outer2 {
                lattice.set(ring, x, y);
            }
        }
    }
}

/// `steps` writes along a lazy random walk, mirrored into `model`.
///
/// Each step moves to a neighbor (or stays) and writes one of `values`.
pub fn random_walk<T: SiteValue, const R: usize, Rg: Rng + ?Sized>(
    lattice: &mut GrowingLattice<T, R>,
    model: &mut ReferenceLattice<T>,
    rng: &mut Rg,
    steps: usize,
    values: &[T],
) {
    let (mut x, mut y) = (0i64, 0i64);
    for _ in 0..steps {
        match rng.random_range(0..5) {
            0 => x += 1,
            1 => x -= 1,
            2 => y += 1,
            3 => y -= 1,
            _ => {}
        }
        let v = values[rng.random_range(0..values.len())];
        lattice.set(v, x, y);
        model.set(v, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_walk() {
        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut l: GrowingLattice<u8, 2> = GrowingLattice::new(0, 1).unwrap();
            let mut model = ReferenceLattice::new(0, 1);
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            random_walk(&mut l, &mut model, &mut rng, 500, &[0, 1, 2]);
            runs.push((l, model.sites().collect::<Vec<_>>()));
        }
        assert_eq!(runs[0].0, runs[1].0);
        assert_eq!(runs[0].1, runs[1].1);
    }

    #[test]
    fn disk_is_full_inside_ring_outside() {
        let mut l: GrowingLattice<u8, 2> = GrowingLattice::new(0, 1).unwrap();
        disk(&mut l, 0, 0, 5, 3);
        assert_eq!(l.get(0, 0), 1);
        assert_eq!(l.get(5, 0), 1);
        assert_eq!(l.get(6, 0), 3);
        assert_eq!(l.get(7, 0), 0);
    }
}
