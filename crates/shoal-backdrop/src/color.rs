//! Colour utilities for the backdrop.

use ratatui::style::Color;

/// Straight-alpha colour, as a canvas gradient stop would hold it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation towards `other`; `t` is clamped to `0..=1`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composite over an opaque base colour.
    pub fn over(self, base: (u8, u8, u8)) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        let channel = |top: f32, bottom: u8| (top * a + bottom as f32 * (1.0 - a)).round() as u8;
        Color::Rgb(
            channel(self.r, base.0),
            channel(self.g, base.1),
            channel(self.b, base.2),
        )
    }
}

/// Mix two opaque colours; `t = 0` is `from`, `t = 1` is `to`.
pub fn mix(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    (
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Unpack an RGB colour produced by this module.
pub fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    }
}
