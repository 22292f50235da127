//! Stipple engine crate.
//!
//! GPU scatter rendering with an interactive pan/zoom camera: coordinate
//! mapping, spatial indexing, the point pipeline and the command router that
//! drives it, plus the winit runtime used by desktop hosts.

pub mod camera;
pub mod command;
pub mod coords;
pub mod data;
pub mod device;
pub mod error;
pub mod index;
pub mod math;
pub mod paint;
pub mod render;
pub mod scale;

pub mod core;
pub mod input;
pub mod logging;
pub mod window;

pub use error::{Error, Result};
