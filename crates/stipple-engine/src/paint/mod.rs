//! Color representation shared by the pipeline config and the renderer.

pub mod color;

pub use color::Color;
