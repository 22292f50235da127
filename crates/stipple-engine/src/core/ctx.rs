use winit::window::{CursorIcon, Window};

use crate::coords::Vec2;
use crate::input::{pointer_to_clip, InputFrame, InputState};
use crate::window::RuntimeCtx;

/// Borrowed window handle with the queries hosts need.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f64, f64) {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        (logical.width, logical.height)
    }

    /// Converts a logical pointer position into clip space for this window.
    pub fn to_clip(&self, x: f32, y: f32) -> Vec2 {
        let (w, h) = self.logical_size();
        pointer_to_clip(x as f64, y as f64, w, h)
    }

    pub fn set_cursor(&self, cursor: CursorIcon) {
        self.window.set_cursor(cursor);
    }
}

/// Context passed to [`App::on_window_event`](super::App::on_window_event).
pub struct EventCtx<'a> {
    pub window: WindowCtx<'a>,
    pub input: &'a InputState,
    pub runtime: &'a mut RuntimeCtx,
}

/// Context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    /// Frames run so far, starting at 0.
    pub frame_index: u64,
    pub runtime: &'a mut RuntimeCtx,
}
