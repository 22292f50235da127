//! Static spatial index over padded point boxes.
//!
//! Built in bulk once per dataset and queried for rectangle overlap (viewport
//! culling, hit testing). There is no incremental update: a new dataset gets a
//! new index.

mod packed;

pub use packed::{SpatialIndex, DEFAULT_NODE_SIZE};
