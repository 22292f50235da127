//! Seam between the render pipeline and the GPU.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::error::Result;
use crate::paint::Color;

/// Uniform block shared by the point shader stages.
///
/// Layout matches `Uniforms` in `shaders/points.wgsl` (64 bytes):
///
///  offset  0  view_proj   mat3x3<f32> (three 16-byte columns)
///  offset 48  viewport    vec2<f32>
///  offset 56  point_size  f32
///  offset 60  color_mode  u32
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointUniforms {
    pub view_proj: [[f32; 4]; 3],
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub color_mode: u32,
}

/// Everything needed to issue one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParams {
    pub uniforms: PointUniforms,
    pub clear: Color,
    /// Number of points to draw from the bound buffers.
    pub count: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The surface was lost or timed out; nothing reached the screen.
    Skipped,
}

/// GPU-facing operations the pipeline relies on.
///
/// Buffers persist across frames: uploads replace their contents, and
/// `draw_frame` reuses whatever was uploaded last.
pub trait PointBackend {
    /// Drawable size in physical pixels.
    fn canvas_size(&self) -> Viewport;

    fn resize(&mut self, width: u32, height: u32);

    /// Replaces the position buffer (pixel-space `(x, y)` per point).
    fn upload_positions(&mut self, positions: &[[f32; 2]]) -> Result<()>;

    /// Replaces the color buffer (one `[f32; 3]` per point).
    fn upload_colors(&mut self, colors: &[[f32; 3]]) -> Result<()>;

    /// Writes the uniforms, clears the target and draws `count` sprites in a
    /// single call.
    fn draw_frame(&mut self, frame: &FrameParams) -> Result<FrameOutcome>;
}

impl<B: PointBackend + ?Sized> PointBackend for Box<B> {
    fn canvas_size(&self) -> Viewport {
        (**self).canvas_size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn upload_positions(&mut self, positions: &[[f32; 2]]) -> Result<()> {
        (**self).upload_positions(positions)
    }

    fn upload_colors(&mut self, colors: &[[f32; 3]]) -> Result<()> {
        (**self).upload_colors(colors)
    }

    fn draw_frame(&mut self, frame: &FrameParams) -> Result<FrameOutcome> {
        (**self).draw_frame(frame)
    }
}
