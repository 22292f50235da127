use crate::math::Mat3;

pub const MIN_ZOOM: f64 = 0.02;
pub const MAX_ZOOM: f64 = 100.0;

/// Exponent applied per unit of wheel delta: `zoom *= 2^(-delta * ZOOM_SENSITIVITY)`.
pub const ZOOM_SENSITIVITY: f64 = 0.01;

/// Camera placement in pixel space of the mapped dataset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    /// Always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, rotation: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// `translate(x, y) · rotate(rotation) · scale(1 / zoom)`.
    pub fn matrix(&self) -> Mat3 {
        let s = 1.0 / self.zoom;
        Mat3::identity()
            .translate(self.x, self.y)
            .rotate(self.rotation)
            .scale(s, s)
    }

    /// Applies a wheel delta to the zoom factor, clamped to the legal range.
    pub fn zoomed_by(self, delta_y: f64) -> f64 {
        let next = self.zoom * (-delta_y * ZOOM_SENSITIVITY).exp2();
        if next.is_nan() {
            self.zoom
        } else {
            next.clamp(MIN_ZOOM, MAX_ZOOM)
        }
    }
}
