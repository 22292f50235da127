//! Point rendering.
//!
//! [`RenderPipeline`] owns the dataset, the camera and the dirty tracking; it
//! talks to the GPU through the [`PointBackend`] seam. [`WgpuBackend`] is the
//! real implementation, built on [`PointRenderer`].
//!
//! Convention: positions are in canvas pixels of the mapped dataset (top-left
//! origin, +Y down); the view-projection uniform takes them to clip space.

mod backend;
mod ctx;
mod gpu_backend;
mod pipeline;
mod points;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{FrameOutcome, FrameParams, PointBackend, PointUniforms};
pub use ctx::{RenderCtx, RenderTarget};
pub use gpu_backend::WgpuBackend;
pub use pipeline::{FrameReport, PipelineConfig, RenderPipeline};
pub use points::PointRenderer;
