//! Data-space → canvas-pixel mapping.
//!
//! A [`CoordinateMapper`] is derived from a dataset's extents every time the
//! dataset changes and is never reused across datasets.

mod linear;
mod mapper;

pub use linear::LinearScale;
pub use mapper::CoordinateMapper;
