//! Window + event loop.
//!
//! Owns the `winit` event loop and window and hands the window to the app,
//! which binds its own GPU surface to it.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::window::CursorIcon;
