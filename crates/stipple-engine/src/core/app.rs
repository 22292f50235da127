use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

use super::ctx::{EventCtx, FrameCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by hosts.
pub trait App {
    /// Called once the window exists, before any other callback.
    ///
    /// The window is shared so the host can bind a GPU surface to it.
    /// An error stops the runtime.
    fn on_window_created(&mut self, window: Arc<Window>) -> anyhow::Result<()>;

    /// Called for every window event before the runtime reacts to it.
    fn on_window_event(&mut self, ctx: &mut EventCtx<'_>, event: &WindowEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per redraw, with the input gathered since the previous one.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
