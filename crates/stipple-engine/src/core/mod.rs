//! Contracts between the runtime (platform loop) and the host application.
//!
//! The host never sees the event loop itself; it gets the window once, then
//! per-event and per-frame contexts.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{EventCtx, FrameCtx, WindowCtx};
