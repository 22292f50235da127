use crate::coords::{Vec2, Viewport};

use super::LinearScale;

/// Per-axis scales from data space onto a canvas.
///
/// X maps `[min(xs), max(xs)] → [0, width]`; Y maps
/// `[min(ys), max(ys)] → [height, 0]` so larger data values sit higher on
/// screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl CoordinateMapper {
    pub fn build(xs: &[f64], ys: &[f64], target: Viewport) -> Self {
        Self {
            x: LinearScale::from_extent(xs, (0.0, target.width)),
            y: LinearScale::from_extent(ys, (target.height, 0.0)),
        }
    }

    #[inline]
    pub fn map(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(self.x.apply(x), self.y.apply(y))
    }

    /// Canvas pixel → data space.
    #[inline]
    pub fn unmap(&self, p: Vec2) -> (f64, f64) {
        (self.x.invert(p.x), self.y.invert(p.y))
    }

    /// Maps index-aligned coordinate slices. Callers validate lengths.
    pub fn map_all(&self, xs: &[f64], ys: &[f64]) -> Vec<Vec2> {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| self.map(x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_scale_is_monotonic_and_hits_canvas_edges() {
        let canvas = Viewport::new(640.0, 480.0);
        let m = CoordinateMapper::build(&[0.0, 50.0, 100.0], &[0.0, 1.0, 2.0], canvas);
        let (a, b, c) = (m.x.apply(0.0), m.x.apply(50.0), m.x.apply(100.0));
        assert!(a < b && b < c);
        assert_eq!(a, 0.0);
        assert_eq!(c, 640.0);
    }

    #[test]
    fn y_scale_is_flipped() {
        let m = CoordinateMapper::build(&[0.0, 1.0], &[0.0, 10.0], Viewport::new(100.0, 100.0));
        assert_eq!(m.y.apply(0.0), 100.0);
        assert_eq!(m.y.apply(10.0), 0.0);
    }

    #[test]
    fn degenerate_axis_centres_points() {
        let canvas = Viewport::new(640.0, 480.0);
        let m = CoordinateMapper::build(&[42.0, 42.0, 42.0], &[1.0, 2.0, 3.0], canvas);
        let p = m.map(42.0, 2.0);
        assert!(p.is_finite());
        assert_eq!(p.x, 320.0);
        assert_eq!(p.y, 240.0);
    }

    #[test]
    fn two_point_scenario() {
        let m = CoordinateMapper::build(&[0.0, 10.0], &[0.0, 10.0], Viewport::new(100.0, 100.0));
        assert_eq!(m.x.apply(0.0), 0.0);
        assert_eq!(m.x.apply(10.0), 100.0);
        let mapped = m.map_all(&[0.0, 10.0], &[0.0, 10.0]);
        assert_eq!(mapped, vec![Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)]);
    }

    #[test]
    fn unmap_round_trips() {
        let m = CoordinateMapper::build(&[-5.0, 5.0], &[10.0, 30.0], Viewport::new(200.0, 100.0));
        let (x, y) = m.unmap(m.map(2.5, 25.0));
        assert!((x - 2.5).abs() < 1e-12);
        assert!((y - 25.0).abs() < 1e-12);
    }
}
