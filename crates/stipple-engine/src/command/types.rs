use std::fmt;

use crate::coords::Vec2;
use crate::data::ColorSet;

/// The command vocabulary.
///
/// `B` is the backend handed over by `Init`; every other variant is plain
/// data and can also arrive as JSON.
pub enum Command<B> {
    /// Builds the render pipeline on top of `B`.
    Init(B),
    SetData { x: Vec<f64>, y: Vec<f64> },
    SetColors(ColorSet),
    Render,
    /// Begins a pan when idle, continues it while panning.
    HandlePan(Vec2),
    HandleZoom { clip: Vec2, delta_y: f64 },
    /// Continues an active pan.
    MoveCamera(Vec2),
    EndPan,
    Resize { width: u32, height: u32 },
}

impl<B> Command<B> {
    /// Wire tag of this command.
    pub fn tag(&self) -> &'static str {
        match self {
            Command::Init(_) => "init",
            Command::SetData { .. } => "setData",
            Command::SetColors(_) => "setColors",
            Command::Render => "render",
            Command::HandlePan(_) => "handlePan",
            Command::HandleZoom { .. } => "handleZoom",
            Command::MoveCamera(_) => "moveCamera",
            Command::EndPan => "endPan",
            Command::Resize { .. } => "resize",
        }
    }

    #[inline]
    pub fn is_render(&self) -> bool {
        matches!(self, Command::Render)
    }

    /// Pointer gestures never fail, even before `init`.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Command::HandlePan(_)
                | Command::HandleZoom { .. }
                | Command::MoveCamera(_)
                | Command::EndPan
        )
    }
}

impl<B> fmt::Debug for Command<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Init(_) => f.write_str("Init(..)"),
            Command::SetData { x, y } => f
                .debug_struct("SetData")
                .field("x_len", &x.len())
                .field("y_len", &y.len())
                .finish(),
            Command::SetColors(colors) => f
                .debug_struct("SetColors")
                .field("mode", &colors.mode())
                .finish(),
            Command::Render => f.write_str("Render"),
            Command::HandlePan(clip) => f.debug_tuple("HandlePan").field(clip).finish(),
            Command::HandleZoom { clip, delta_y } => f
                .debug_struct("HandleZoom")
                .field("clip", clip)
                .field("delta_y", delta_y)
                .finish(),
            Command::MoveCamera(clip) => f.debug_tuple("MoveCamera").field(clip).finish(),
            Command::EndPan => f.write_str("EndPan"),
            Command::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
        }
    }
}
