//! Print the statistics of a lattice file.
//!
//! ```text
//! cargo run --example inspect -- <file> [--tree]
//! ```
//!
//! The value width and leaf radius are read from the file header first, so
//! the file is loaded into a lattice of the matching concrete type. Widths
//! are mapped to unsigned integers of the same size.

use std::process::ExitCode;

use growlat::codec::{read_file_header, FormatVersion};
use growlat::prelude::*;

fn inspect<T: SiteValue, const R: usize>(
    path: &str,
    empty: T,
    full: T,
    tree: bool,
) -> Result<(), CodecError> {
    let mut lattice = match GrowingLattice::<T, R>::new(empty, full) {
        Ok(l) => l,
        Err(e) => return Err(CodecError::malformed(e.to_string())),
    };
    lattice.load(path)?;
    println!("{}", lattice.stats(tree));
    println!(
        "empty = {:?}, full = {:?}",
        lattice.empty_value(),
        lattice.full_value()
    );
    Ok(())
}

macro_rules! dispatch_radius {
    ($ty:ty, $radius:expr, $path:expr, $tree:expr, [$($r:literal),*]) => {
        match $radius {
            $($r => inspect::<$ty, $r>($path, 0, 1, $tree),)*
            other => {
                eprintln!("unsupported leaf radius {other}");
                return ExitCode::FAILURE;
            }
        }
    };
}

macro_rules! dispatch {
    ($ty:ty, $radius:expr, $path:expr, $tree:expr) => {
        dispatch_radius!($ty, $radius, $path, $tree, [5, 10, 30, 50, 100])
    };
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: inspect <file> [--tree]");
        return ExitCode::FAILURE;
    };
    let tree = args.iter().any(|a| a == "--tree");

    let header = match read_file_header(path) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (Some(width), Some(radius)) = (header.value_width, header.radius) else {
        debug_assert_eq!(header.version, FormatVersion::Legacy);
        eprintln!("{path}: legacy file, value width and radius are not recorded");
        return ExitCode::FAILURE;
    };
    println!("{path}: value width {width} bytes, R = {radius}");

    let result = match width {
        1 => dispatch!(u8, radius, path, tree),
        2 => dispatch!(u16, radius, path, tree),
        4 => dispatch!(u32, radius, path, tree),
        8 => dispatch!(u64, radius, path, tree),
        other => {
            eprintln!("unsupported value width {other}");
            return ExitCode::FAILURE;
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{path}: {e}");
            ExitCode::FAILURE
        }
    }
}
