use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::error::{Error, Result};

use super::{FrameOutcome, FrameParams, PointBackend, PointRenderer, RenderCtx, RenderTarget};

/// [`PointBackend`] that draws into a wgpu surface.
pub struct WgpuBackend {
    gpu: Gpu<'static>,
    points: PointRenderer,
}

impl WgpuBackend {
    /// Binds a GPU context to `window` and builds the point pipeline.
    ///
    /// Any failure (adapter, device, surface, shader) is an [`Error::Setup`].
    pub fn for_window(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        Self::new(window, size, init)
    }

    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: PhysicalSize<u32>,
        init: GpuInit,
    ) -> Result<Self> {
        let gpu = pollster::block_on(Gpu::new(target, size, init)).map_err(Error::setup)?;
        let mut points = PointRenderer::new();
        {
            let ctx = render_ctx(&gpu);
            points.prepare(&ctx)?;
        }
        log::info!("point renderer ready ({:?})", gpu.surface_format());
        Ok(Self { gpu, points })
    }

    pub fn gpu(&self) -> &Gpu<'static> {
        &self.gpu
    }
}

fn render_ctx<'a>(gpu: &'a Gpu<'static>) -> RenderCtx<'a> {
    let size = gpu.size();
    RenderCtx::new(
        gpu.device(),
        gpu.queue(),
        gpu.surface_format(),
        Viewport::new(size.width as f64, size.height as f64),
    )
}

impl PointBackend for WgpuBackend {
    fn canvas_size(&self) -> Viewport {
        let size = self.gpu.size();
        Viewport::new(size.width as f64, size.height as f64)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(PhysicalSize::new(width, height));
    }

    fn upload_positions(&mut self, positions: &[[f32; 2]]) -> Result<()> {
        let ctx = render_ctx(&self.gpu);
        self.points.upload_positions(&ctx, positions)
    }

    fn upload_colors(&mut self, colors: &[[f32; 3]]) -> Result<()> {
        let ctx = render_ctx(&self.gpu);
        self.points.upload_colors(&ctx, colors)
    }

    fn draw_frame(&mut self, frame: &FrameParams) -> Result<FrameOutcome> {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Ok(FrameOutcome::Skipped);
        }

        {
            let ctx = render_ctx(&self.gpu);
            self.points.prepare(&ctx)?;
            self.points.write_uniforms(&ctx, &frame.uniforms);
        }

        let mut gpu_frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let reason = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("frame skipped: {reason}");
                        Ok(FrameOutcome::Skipped)
                    }
                    SurfaceErrorAction::Fatal => Err(Error::Surface(reason)),
                };
            }
        };

        {
            let mut target = RenderTarget::new(&mut gpu_frame.encoder, &gpu_frame.view);
            self.points.draw(&mut target, frame.clear, frame.count);
        }

        self.gpu.submit(gpu_frame);
        Ok(FrameOutcome::Presented)
    }
}
