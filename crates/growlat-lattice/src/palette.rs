//! Site colors for plotting front-ends.

use growlat_core::{ColorSource, Rgb, SiteKind, SiteValue};

use crate::lattice::GrowingLattice;

/// Colors a lattice by site kind: empty, full or anything else.
///
/// ```
/// use growlat_core::{ColorSource, Rgb};
/// use growlat_lattice::{GrowingLattice, SitePalette};
///
/// let mut lattice: GrowingLattice<u8, 3> = GrowingLattice::new(0, 1).unwrap();
/// lattice.set(1, 2, 2);
/// let palette = SitePalette::new(&lattice);
/// assert_eq!(palette.color(2, 2), Rgb::BLACK);
/// assert_eq!(palette.color(0, 0), Rgb::WHITE);
/// ```
#[derive(Clone, Copy)]
pub struct SitePalette<'a, T, const R: usize> {
    lattice: &'a GrowingLattice<T, R>,
    /// Color of empty sites. Default: white.
    pub empty: Rgb,
    /// Color of full sites. Default: black.
    pub full: Rgb,
    /// Color of every other site. Default: red.
    pub other: Rgb,
}

impl<'a, T: SiteValue, const R: usize> SitePalette<'a, T, R> {
    /// Palette with the default colors.
    pub fn new(lattice: &'a GrowingLattice<T, R>) -> Self {
        Self::with_colors(lattice, Rgb::WHITE, Rgb::BLACK, Rgb::RED)
    }

    /// Palette with explicit colors.
    pub fn with_colors(lattice: &'a GrowingLattice<T, R>, empty: Rgb, full: Rgb, other: Rgb) -> Self {
        Self {
            lattice,
            empty,
            full,
            other,
        }
    }
}

impl<T: SiteValue, const R: usize> ColorSource for SitePalette<'_, T, R> {
    fn color(&self, x: i64, y: i64) -> Rgb {
        match self.lattice.site_kind(x, y) {
            SiteKind::Empty => self.empty,
            SiteKind::Full => self.full,
            SiteKind::Other => self.other,
        }
    }
}
