//! GPU device and presentation surface.
//!
//! Creates the wgpu instance, adapter, device and queue, configures the
//! surface, and hands out per-frame encoders and views.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
