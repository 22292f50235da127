use crate::camera::CameraController;
use crate::coords::{Vec2, Viewport};
use crate::data::{ColorMode, ColorSet, PointDataset};
use crate::error::{Error, Result};
use crate::index::SpatialIndex;
use crate::paint::Color;
use crate::scale::CoordinateMapper;

use super::{FrameOutcome, FrameParams, PointBackend, PointUniforms};

/// Tunables for [`RenderPipeline`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Sprite diameter in physical pixels.
    pub point_size: f32,
    pub clear_color: Color,
    /// Fill used while no color set is loaded.
    pub default_point_color: Color,
    /// Half-extent of each point's box in the spatial index, in pixels of the
    /// mapped dataset.
    pub index_padding: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            point_size: 10.0,
            clear_color: Color::transparent(),
            default_point_color: Color::from_srgb_u8(31, 119, 180, 255),
            index_padding: 5.0,
        }
    }
}

/// What one `render` / `redraw_camera_only` call did.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Points drawn (0 when the frame was skipped).
    pub drawn: u32,
    pub uploaded_positions: bool,
    pub uploaded_colors: bool,
    /// The surface could not present this frame.
    pub skipped: bool,
}

/// Dataset, camera and GPU buffers for one canvas.
///
/// Position and color buffers are re-uploaded only when `set_data` or
/// `set_colors` marked them dirty; camera changes only touch the uniforms.
pub struct RenderPipeline<B: PointBackend> {
    backend: B,
    config: PipelineConfig,
    camera: CameraController,

    dataset: PointDataset,
    mapper: Option<CoordinateMapper>,
    index: SpatialIndex,
    /// Mapped pixel-space positions, ready for upload.
    positions: Vec<[f32; 2]>,
    colors: Option<ColorSet>,

    positions_dirty: bool,
    colors_dirty: bool,
}

impl<B: PointBackend> RenderPipeline<B> {
    pub fn new(backend: B, config: PipelineConfig) -> Self {
        let camera = CameraController::new(Some(backend.canvas_size()));
        Self {
            backend,
            camera,
            index: SpatialIndex::build(&[], config.index_padding),
            config,
            dataset: PointDataset::default(),
            mapper: None,
            positions: Vec::new(),
            colors: None,
            positions_dirty: false,
            colors_dirty: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.mapper.as_ref()
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn colors(&self) -> Option<&ColorSet> {
        self.colors.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// `true` while a buffer upload is pending.
    pub fn is_dirty(&self) -> bool {
        self.positions_dirty || self.colors_dirty
    }

    fn canvas(&self) -> Viewport {
        self.camera
            .canvas()
            .unwrap_or_else(|| self.backend.canvas_size())
    }

    /// Loads a new dataset.
    ///
    /// Rebuilds the coordinate mapper, the spatial index and the encoded
    /// positions together. On error nothing changes. A loaded color set whose
    /// length no longer matches is dropped in favor of the default fill.
    pub fn set_data(&mut self, xs: Vec<f64>, ys: Vec<f64>) -> Result<()> {
        let dataset = PointDataset::new(xs, ys)?;
        let canvas = self.canvas();

        let mapper = CoordinateMapper::build(dataset.xs(), dataset.ys(), canvas);
        let mapped = mapper.map_all(dataset.xs(), dataset.ys());
        let index = SpatialIndex::build(&mapped, self.config.index_padding);

        let n = dataset.len();
        if let Some(colors) = &self.colors {
            let loaded = colors.len().unwrap_or(0);
            if loaded != n {
                log::warn!("discarding {loaded} colors: new dataset has {n} points");
                self.colors = None;
            }
        }

        self.positions = mapped.iter().map(|p| p.to_f32_array()).collect();
        self.dataset = dataset;
        self.mapper = Some(mapper);
        self.index = index;
        self.positions_dirty = true;
        self.colors_dirty = true;

        log::info!(
            "dataset loaded: {n} points, x {:?} → {:?}, y {:?} → {:?}",
            mapper.x.domain(),
            mapper.x.range(),
            mapper.y.domain(),
            mapper.y.range()
        );
        Ok(())
    }

    /// Loads per-point colors.
    ///
    /// Once a dataset is loaded the color count must match it. Colors sent
    /// before any data are kept until the next `set_data` decides on them.
    pub fn set_colors(&mut self, colors: ColorSet) -> Result<()> {
        let len = colors.len()?;
        let n = self.dataset.len();
        if n > 0 && len != n {
            return Err(Error::DataShape {
                what: "colors",
                expected: n,
                found: len,
            });
        }
        log::debug!("{len} colors loaded ({:?})", colors.mode());
        self.colors = Some(colors);
        self.colors_dirty = true;
        Ok(())
    }

    /// Uploads dirty buffers, then clears and draws every point.
    pub fn render(&mut self) -> Result<FrameReport> {
        let mut report = FrameReport::default();

        if self.positions_dirty {
            self.backend.upload_positions(&self.positions)?;
            self.positions_dirty = false;
            report.uploaded_positions = true;
        }
        if self.colors_dirty {
            let encoded = self.encoded_colors();
            self.backend.upload_colors(&encoded)?;
            self.colors_dirty = false;
            report.uploaded_colors = true;
        }

        self.draw(report)
    }

    /// Rewrites the transform and re-issues the draw without touching vertex
    /// buffers. Falls back to [`render`](Self::render) if an upload is pending.
    pub fn redraw_camera_only(&mut self) -> Result<FrameReport> {
        if self.is_dirty() {
            return self.render();
        }
        self.draw(FrameReport::default())
    }

    fn draw(&mut self, mut report: FrameReport) -> Result<FrameReport> {
        let frame = self.frame_params();
        match self.backend.draw_frame(&frame)? {
            FrameOutcome::Presented => report.drawn = frame.count,
            FrameOutcome::Skipped => report.skipped = true,
        }
        Ok(report)
    }

    fn frame_params(&self) -> FrameParams {
        let canvas = self.canvas();
        let color_mode = self
            .colors
            .as_ref()
            .map_or(ColorMode::Channels, ColorSet::mode);

        FrameParams {
            uniforms: PointUniforms {
                view_proj: self.camera.view_projection().to_gpu_columns(),
                viewport: [canvas.width as f32, canvas.height as f32],
                point_size: self.config.point_size,
                color_mode: color_mode.as_u32(),
            },
            clear: self.config.clear_color,
            count: self.positions.len() as u32,
        }
    }

    fn encoded_colors(&self) -> Vec<[f32; 3]> {
        match &self.colors {
            Some(colors) => colors.encode(),
            None => vec![self.config.default_point_color.rgb(); self.positions.len()],
        }
    }

    /// `handlePan`. Returns `true` when a redraw is due.
    pub fn handle_pan(&mut self, clip: Vec2) -> bool {
        self.camera.handle_pan(clip)
    }

    /// `moveCamera`.
    pub fn move_camera(&mut self, clip: Vec2) -> bool {
        self.camera.continue_pan(clip)
    }

    pub fn end_pan(&mut self) -> bool {
        self.camera.end_pan()
    }

    pub fn zoom(&mut self, clip: Vec2, delta_y: f64) -> bool {
        self.camera.zoom(clip, delta_y)
    }

    /// Resizes the surface and the projection. The dataset keeps its current
    /// pixel mapping until the next `set_data`.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
        self.camera.set_canvas(Viewport::new(width as f64, height as f64));
        log::debug!("canvas resized to {width}x{height}");
    }

    /// Indices of points whose padded boxes touch the visible area.
    pub fn visible_points(&self) -> Vec<usize> {
        self.index.query(self.camera.visible_world_rect())
    }
}
