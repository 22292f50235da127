use super::Vec2;

/// Axis-aligned box stored as min/max corners.
///
/// Edges are closed: boxes that share only an edge still intersect. Point
/// sprites sitting exactly on the view boundary are partially visible, so
/// culling queries must keep them.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Square box of half-extent `pad` centered on `center`.
    #[inline]
    pub fn around(center: Vec2, pad: f64) -> Self {
        Self::new(center.x - pad, center.y - pad, center.x + pad, center.y + pad)
    }

    /// Smallest box containing both corners, in any order.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Box that contains nothing; the identity for [`union`](Self::union).
    #[inline]
    pub const fn empty() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Closed containment: `[min, max]`.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    #[inline]
    pub fn intersects(self, other: Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        Rect::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect { Rect::new(x0, y0, x1, y1) }

    // ── from_corners ──────────────────────────────────────────────────────

    #[test]
    fn from_corners_orders_components() {
        let rect = Rect::from_corners(Vec2::new(10.0, 2.0), Vec2::new(4.0, 8.0));
        assert_eq!(rect, r(4.0, 2.0, 10.0, 8.0));
    }

    #[test]
    fn around_pads_both_axes() {
        let rect = Rect::around(Vec2::new(10.0, 20.0), 5.0);
        assert_eq!(rect, r(5.0, 15.0, 15.0, 25.0));
        assert_eq!(rect.center(), Vec2::new(10.0, 20.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_edges_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 10.5)));
    }

    // ── intersects ────────────────────────────────────────────────────────

    #[test]
    fn intersects_overlapping() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersects(r(5.0, 5.0, 15.0, 15.0)));
    }

    #[test]
    fn intersects_contained() {
        assert!(r(0.0, 0.0, 100.0, 100.0).intersects(r(10.0, 10.0, 20.0, 20.0)));
        assert!(r(10.0, 10.0, 20.0, 20.0).intersects(r(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn intersects_touching_edge() {
        // Closed boxes: a shared edge counts as overlap.
        assert!(r(0.0, 0.0, 10.0, 10.0).intersects(r(10.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn intersects_disjoint() {
        assert!(!r(0.0, 0.0, 5.0, 5.0).intersects(r(20.0, 20.0, 25.0, 25.0)));
        assert!(!r(0.0, 0.0, 5.0, 5.0).intersects(r(0.0, 6.0, 5.0, 9.0)));
    }

    // ── union / empty ─────────────────────────────────────────────────────

    #[test]
    fn union_with_empty_is_identity() {
        let a = r(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Rect::empty().union(a), a);
        assert!(Rect::empty().is_empty());
    }

    #[test]
    fn union_covers_both() {
        let u = r(0.0, 0.0, 1.0, 1.0).union(r(5.0, -2.0, 6.0, 0.5));
        assert_eq!(u, r(0.0, -2.0, 6.0, 1.0));
        assert_eq!(u.width(), 6.0);
        assert_eq!(u.height(), 3.0);
    }
}
