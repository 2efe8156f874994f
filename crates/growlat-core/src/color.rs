//! Per-site color contract consumed by plotting front-ends.
//!
//! A plotter never mutates the lattice: it only asks for the color of a
//! site through [`ColorSource::color`].

/// An opaque 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgb {
    /// Opaque white.
    pub const WHITE: Rgb = Rgb::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgb = Rgb::opaque(0, 0, 0);
    /// Opaque red.
    pub const RED: Rgb = Rgb::opaque(255, 0, 0);

    /// An opaque color from its three channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Read-only source of per-site colors.
pub trait ColorSource {
    /// Color of the site at `(x, y)`.
    fn color(&self, x: i64, y: i64) -> Rgb;
}
