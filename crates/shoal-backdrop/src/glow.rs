//! Radial glow gradient.

use crate::color::Rgba;

/// Inner radius of the gradient, in cells.
const INNER_RADIUS: f32 = 10.0;
/// Outer radius as a fraction of the surface width.
const OUTER_RADIUS: f32 = 0.9;
/// Glow centre as a fraction of the surface size.
const CENTER: (f32, f32) = (0.2, 0.2);
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Colour at the glow centre.
pub const GLOW_STOP: Rgba = Rgba::new(0.0, 200.0, 255.0, 0.30);
/// Colour at and beyond the outer radius.
pub const SHADE_STOP: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.20);

/// Gradient colour of cell `(x, y)` on a `width` × `height` surface.
pub fn radial_glow(x: u16, y: u16, width: u16, height: u16) -> Rgba {
    let cx = width as f32 * CENTER.0;
    let cy = height as f32 * CENTER.1;
    let dx = x as f32 + 0.5 - cx;
    let dy = (y as f32 + 0.5 - cy) * CELL_ASPECT;
    let distance = (dx * dx + dy * dy).sqrt();

    let outer = width as f32 * OUTER_RADIUS;
    let t = if outer <= INNER_RADIUS {
        if distance <= INNER_RADIUS { 0.0 } else { 1.0 }
    } else {
        (distance - INNER_RADIUS) / (outer - INNER_RADIUS)
    };
    GLOW_STOP.lerp(SHADE_STOP, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_takes_first_stop() {
        assert_eq!(radial_glow(20, 5, 100, 25), GLOW_STOP);
    }

    #[test]
    fn test_far_corner_takes_last_stop() {
        assert_eq!(radial_glow(99, 49, 100, 50), SHADE_STOP);
    }

    #[test]
    fn test_fades_with_distance() {
        let near = radial_glow(35, 5, 100, 25);
        let far = radial_glow(60, 5, 100, 25);
        assert!(near.a > far.a);
        assert!(near.g > far.g);
    }

    #[test]
    fn test_narrow_surface_uses_hard_edge() {
        assert_eq!(radial_glow(0, 0, 5, 5), GLOW_STOP);
    }
}
