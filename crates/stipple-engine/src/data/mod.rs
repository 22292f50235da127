//! Point datasets and per-point color sets as received from the host.

mod colors;
mod dataset;

pub use colors::{unpack_packed_color, ColorMode, ColorSet, PACKED_COLOR_MASK};
pub use dataset::PointDataset;
