//! Benchmark profiles for the growlat sparse lattice.
//!
//! Deterministic workloads shared by the benches:
//!
//! - [`scatter_sites`]: uniformly scattered sites in a square window
//! - [`idla_cluster`]: internal diffusion-limited aggregation from the origin,
//!   the canonical "growing full blob" workload
//! - [`checkerboard`]: a worst case for compression

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use growlat_core::Rect;
use growlat_lattice::GrowingLattice;

/// Knuth's MMIX LCG step.
#[inline]
fn lcg(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 33
}

/// `n` deterministic sites uniformly spread over `[-spread, spread]²`.
pub fn scatter_sites(n: usize, spread: i64, seed: u64) -> Vec<(i64, i64)> {
    let side = (2 * spread + 1) as u64;
    let mut state = seed;
    (0..n)
        .map(|_| {
            let x = (lcg(&mut state) % side) as i64 - spread;
            let y = (lcg(&mut state) % side) as i64 - spread;
            (x, y)
        })
        .collect()
}

/// Grow an IDLA cluster of `particles` full sites.
///
/// Each particle starts at the origin and walks until it reaches an empty
/// site, which it fills. The result is a near-disk of full sites of radius
/// about `sqrt(particles / π)`.
pub fn idla_cluster<const R: usize>(particles: usize, seed: u64) -> GrowingLattice<u8, R> {
    let mut lattice = match GrowingLattice::new(0, 1) {
        Ok(l) => l,
        Err(e) => panic!("{e}"),
    };
    let mut state = seed;
    for _ in 0..particles {
        let (mut x, mut y) = (0i64, 0i64);
        while lattice.get(x, y) == 1 {
            match lcg(&mut state) & 3 {
                0 => x += 1,
                1 => x -= 1,
                2 => y += 1,
                _ => y -= 1,
            }
        }
        lattice.set(1, x, y);
    }
    lattice
}

/// Alternate full and "other" sites over `rect`: no block ever compresses.
pub fn checkerboard<const R: usize>(rect: Rect) -> GrowingLattice<u8, R> {
    let mut lattice = match GrowingLattice::new(0, 1) {
        Ok(l) => l,
        Err(e) => panic!("{e}"),
    };
    for x in rect.x_min..=rect.x_max {
        for y in rect.y_min..=rect.y_max {
            let v = if (x + y).rem_euclid(2) == 0 { 1 } else { 2 };
            lattice.set(v, x, y);
        }
    }
    lattice
}
