//! Grow an internal diffusion-limited aggregation cluster and save it.
//!
//! ```text
//! cargo run --release --example idla -- [particles] [output]
//! ```
//!
//! Every particle starts at the origin and walks at random until it steps
//! on an empty site, which becomes full. The cluster quickly becomes a
//! near-perfect disk whose interior collapses into full sentinels.

use std::process::ExitCode;

use growlat::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let particles: u64 = match args.next().map(|a| a.parse()) {
        None => 100_000,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("invalid particle count: {e}");
            return ExitCode::FAILURE;
        }
    };
    let output = args.next();

    let mut lattice: GrowingLattice<u8, 30> = match GrowingLattice::new(0, 1) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0x1d1a);
    let mut steps = 0u64;
    for _ in 0..particles {
        let (mut x, mut y) = (0i64, 0i64);
        while lattice.get(x, y) == 1 {
            match rng.random_range(0..4) {
                0 => x += 1,
                1 => x -= 1,
                2 => y += 1,
                _ => y -= 1,
            }
            steps += 1;
        }
        lattice.set(1, x, y);
    }

    println!("{particles} particles, {steps} walk steps");
    println!("{}", lattice.stats(false));
    if let Some(r) = lattice.improved_enclosing_rect_full(0, 0) {
        println!("full rectangle around the origin: {r}");
    }

    if let Some(path) = output {
        if let Err(e) = lattice.save(&path) {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
        println!("saved to {path}");
    }
    ExitCode::SUCCESS
}
