//! Coordinate and geometry types shared by the camera, index and renderer.
//!
//! Canonical CPU space for point geometry:
//! - canvas pixels after coordinate mapping (origin top-left, +X right, +Y down)
//! - f64 on the CPU; narrowed to f32 only when uploaded to the GPU
//!
//! The camera maps this space to clip space through the view-projection matrix.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
