use std::cell::Cell;

use crate::coords::{Rect, Vec2, Viewport};
use crate::math::Mat3;

use super::Camera;

/// State captured when a drag starts and consumed by every move of that drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureSession {
    pub start_camera: Camera,
    /// World point under the pointer when the drag began.
    pub start_world: Vec2,
    /// Inverse view-projection at drag start. Moves are resolved against this
    /// snapshot so the grabbed point stays under the pointer.
    start_inverse: Mat3,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    Panning(GestureSession),
}

/// Owns the camera and derives the view-projection matrix from it.
///
/// Every mutating gesture returns `true` when the caller should redraw.
/// Without a canvas size the view-projection is the identity, so gestures
/// degrade to no-ops on the camera offset instead of failing.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    camera: Camera,
    canvas: Option<Viewport>,
    state: PanState,
    view_proj: Cell<Option<Mat3>>,
}

impl CameraController {
    pub fn new(canvas: Option<Viewport>) -> Self {
        Self {
            canvas: canvas.filter(|v| v.is_valid()),
            ..Self::default()
        }
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[inline]
    pub fn canvas(&self) -> Option<Viewport> {
        self.canvas
    }

    #[inline]
    pub fn state(&self) -> PanState {
        self.state
    }

    #[inline]
    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning(_))
    }

    /// Replaces the camera wholesale. Zoom is clamped into range.
    pub fn set_camera(&mut self, mut camera: Camera) {
        camera.zoom = camera.zoom.clamp(super::MIN_ZOOM, super::MAX_ZOOM);
        self.camera = camera;
        self.invalidate();
    }

    /// Records the canvas pixel size. Invalid sizes clear it.
    pub fn set_canvas(&mut self, canvas: Viewport) {
        self.canvas = Some(canvas).filter(|v| v.is_valid());
        self.invalidate();
    }

    #[inline]
    fn invalidate(&self) {
        self.view_proj.set(None);
    }

    /// `projection(canvas) · inverse(camera)`, cached until the camera or the
    /// canvas changes.
    pub fn view_projection(&self) -> Mat3 {
        if let Some(m) = self.view_proj.get() {
            return m;
        }
        let m = match self.canvas {
            Some(canvas) => {
                let view = self.camera.matrix().invert().unwrap_or_default();
                Mat3::projection(canvas.width, canvas.height) * view
            }
            None => Mat3::identity(),
        };
        self.view_proj.set(Some(m));
        m
    }

    pub fn inverse_view_projection(&self) -> Mat3 {
        self.view_projection().invert().unwrap_or_default()
    }

    #[inline]
    pub fn clip_to_world(&self, clip: Vec2) -> Vec2 {
        self.inverse_view_projection().transform_point(clip)
    }

    /// World-space bounds of the visible clip square.
    pub fn visible_world_rect(&self) -> Rect {
        let inv = self.inverse_view_projection();
        [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]
        .into_iter()
        .map(|c| inv.transform_point(c))
        .fold(Rect::empty(), |acc, p| acc.union(Rect::from_corners(p, p)))
    }

    /// Idle → Panning. Restarts the session if a drag is already active.
    pub fn begin_pan(&mut self, clip: Vec2) -> bool {
        let start_inverse = self.inverse_view_projection();
        self.state = PanState::Panning(GestureSession {
            start_camera: self.camera,
            start_world: start_inverse.transform_point(clip),
            start_inverse,
        });
        true
    }

    /// Moves the camera so the grabbed world point follows the pointer.
    /// A stray move while Idle is ignored.
    pub fn continue_pan(&mut self, clip: Vec2) -> bool {
        let PanState::Panning(session) = self.state else {
            return false;
        };
        let world = session.start_inverse.transform_point(clip);
        self.camera.x = session.start_camera.x + session.start_world.x - world.x;
        self.camera.y = session.start_camera.y + session.start_world.y - world.y;
        self.invalidate();
        true
    }

    /// `handlePan`: begins a drag when Idle, continues it otherwise.
    pub fn handle_pan(&mut self, clip: Vec2) -> bool {
        match self.state {
            PanState::Idle => self.begin_pan(clip),
            PanState::Panning(_) => self.continue_pan(clip),
        }
    }

    /// Panning → Idle. The camera is left where the last move put it.
    pub fn end_pan(&mut self) -> bool {
        let was_panning = self.is_panning();
        self.state = PanState::Idle;
        was_panning
    }

    /// Anchor-preserving zoom around a clip-space point. Valid in any state.
    pub fn zoom(&mut self, clip: Vec2, delta_y: f64) -> bool {
        let before = self.clip_to_world(clip);

        self.camera.zoom = self.camera.zoomed_by(delta_y);
        self.invalidate();

        let after = self.clip_to_world(clip);
        self.camera.x += before.x - after.x;
        self.camera.y += before.y - after.y;
        self.invalidate();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{MAX_ZOOM, MIN_ZOOM};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn controller() -> CameraController {
        CameraController::new(Some(Viewport::new(800.0, 600.0)))
    }

    fn assert_vec(a: Vec2, b: Vec2, eps: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = eps);
        assert_relative_eq!(a.y, b.y, epsilon = eps);
    }

    #[test]
    fn default_view_maps_canvas_to_clip() {
        let c = controller();
        let vp = c.view_projection();
        assert_vec(vp.transform_point(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0), 1e-12);
        assert_vec(vp.transform_point(Vec2::new(400.0, 300.0)), Vec2::zero(), 1e-12);
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut c = controller();
        let clip = Vec2::new(0.3, -0.6);
        let anchor = c.clip_to_world(clip);

        c.zoom(clip, -120.0);

        assert!(c.camera().zoom > 1.0);
        assert_vec(c.view_projection().transform_point(anchor), clip, 1e-9);
    }

    #[test]
    fn zoom_is_clamped_at_both_ends() {
        let mut c = controller();
        for _ in 0..100 {
            c.zoom(Vec2::zero(), -500.0);
        }
        assert_eq!(c.camera().zoom, MAX_ZOOM);
        for _ in 0..100 {
            c.zoom(Vec2::zero(), 500.0);
        }
        assert_eq!(c.camera().zoom, MIN_ZOOM);
    }

    #[test]
    fn pan_without_motion_leaves_camera_unchanged() {
        let mut c = controller();
        c.zoom(Vec2::new(0.1, 0.1), -50.0);
        let before = c.camera();

        let p = Vec2::new(0.25, -0.4);
        assert!(c.begin_pan(p));
        assert!(c.continue_pan(p));

        let after = c.camera();
        assert_relative_eq!(after.x, before.x, epsilon = 1e-9);
        assert_relative_eq!(after.y, before.y, epsilon = 1e-9);
        assert_eq!(after.zoom, before.zoom);
    }

    #[test]
    fn drag_keeps_grabbed_point_under_pointer() {
        let mut c = controller();
        let start = Vec2::new(-0.5, 0.5);
        let grabbed = c.clip_to_world(start);

        c.begin_pan(start);
        for step in 1..=10 {
            let t = step as f64 / 10.0;
            let p = Vec2::new(-0.5 + t * 0.8, 0.5 - t * 0.3);
            c.continue_pan(p);
            assert_vec(c.view_projection().transform_point(grabbed), p, 1e-9);
        }
        assert!(c.end_pan());
        assert!(!c.is_panning());
    }

    #[test]
    fn pan_moves_camera_opposite_to_drag() {
        let mut c = controller();
        c.begin_pan(Vec2::zero());
        c.continue_pan(Vec2::new(0.5, 0.0));
        // half the clip width is 200 px at zoom 1
        assert_relative_eq!(c.camera().x, -200.0, epsilon = 1e-9);
        assert_relative_eq!(c.camera().y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn handle_pan_begins_then_continues() {
        let mut c = controller();
        c.handle_pan(Vec2::zero());
        assert!(c.is_panning());
        c.handle_pan(Vec2::new(0.0, -0.5));
        assert_relative_eq!(c.camera().y, -150.0, epsilon = 1e-9);
    }

    #[test]
    fn stray_move_while_idle_is_ignored() {
        let mut c = controller();
        assert!(!c.continue_pan(Vec2::new(0.9, 0.9)));
        assert!(!c.end_pan());
        assert_eq!(c.camera(), Camera::default());
    }

    #[test]
    fn gestures_without_canvas_do_not_fail() {
        let mut c = CameraController::new(None);
        assert!(c.view_projection().approx_eq(&Mat3::identity(), 0.0));
        c.begin_pan(Vec2::new(0.2, 0.2));
        c.continue_pan(Vec2::new(-0.2, 0.4));
        c.zoom(Vec2::new(0.5, 0.5), 100.0);
        c.end_pan();

        let cam = c.camera();
        assert!(cam.x.is_finite() && cam.y.is_finite());
        assert_relative_eq!(cam.zoom, 0.5);
    }

    #[test]
    fn resize_invalidates_cached_projection() {
        let mut c = controller();
        let before = c.view_projection();
        c.set_canvas(Viewport::new(400.0, 300.0));
        assert!(!c.view_projection().approx_eq(&before, 1e-12));
        assert_vec(
            c.view_projection().transform_point(Vec2::new(200.0, 150.0)),
            Vec2::zero(),
            1e-12,
        );
    }

    #[test]
    fn visible_rect_covers_canvas_at_default_zoom() {
        let c = controller();
        let r = c.visible_world_rect();
        assert_relative_eq!(r.min.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.min.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.max.x, 800.0, epsilon = 1e-9);
        assert_relative_eq!(r.max.y, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn visible_rect_shrinks_when_zoomed_in() {
        let mut c = controller();
        c.zoom(Vec2::zero(), -100.0);
        let r = c.visible_world_rect();
        assert_relative_eq!(r.width(), 400.0, epsilon = 1e-9);
        assert_relative_eq!(r.height(), 300.0, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn zoom_round_trip_restores_camera(
            cx in -1.0f64..1.0,
            cy in -1.0f64..1.0,
            delta in -500.0f64..500.0,
        ) {
            let mut c = controller();
            let start = c.camera();
            c.zoom(Vec2::new(cx, cy), delta);
            c.zoom(Vec2::new(cx, cy), -delta);
            let end = c.camera();
            prop_assert!((end.zoom - start.zoom).abs() < 1e-9);
            prop_assert!((end.x - start.x).abs() < 1e-6);
            prop_assert!((end.y - start.y).abs() < 1e-6);
        }

        #[test]
        fn zoom_anchor_holds_anywhere(
            cx in -1.0f64..1.0,
            cy in -1.0f64..1.0,
            delta in -300.0f64..300.0,
            pan_x in -500.0f64..500.0,
            pan_y in -500.0f64..500.0,
        ) {
            let mut c = controller();
            c.set_camera(Camera { x: pan_x, y: pan_y, ..Camera::default() });
            let clip = Vec2::new(cx, cy);
            let anchor = c.clip_to_world(clip);
            c.zoom(clip, delta);
            let back = c.view_projection().transform_point(anchor);
            prop_assert!((back.x - cx).abs() < 1e-9);
            prop_assert!((back.y - cy).abs() < 1e-9);
        }
    }
}
