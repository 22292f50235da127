//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s; hosts turn them
//! into clip-space commands with [`pointer_to_clip`].

mod clip;
mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use clip::{pointer_to_clip, WHEEL_LINE_PIXELS};
pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
