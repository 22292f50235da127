use crate::coords::{Vec2, Viewport};

/// Pixels scrolled per wheel "line".
pub const WHEEL_LINE_PIXELS: f64 = 100.0;

/// Converts a pointer position inside the canvas into clip space.
///
/// `(0, 0)` is the top-left corner and maps to `(-1, 1)`; the bottom-right
/// corner maps to `(1, -1)`. Positions outside the canvas map outside
/// `[-1, 1]²`. A degenerate canvas yields the center.
pub fn pointer_to_clip(x: f64, y: f64, width: f64, height: f64) -> Vec2 {
    if !Viewport::new(width, height).is_valid() {
        return Vec2::zero();
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height * 2.0 - 1.0))
}
