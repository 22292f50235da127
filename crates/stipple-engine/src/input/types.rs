use super::clip::WHEEL_LINE_PIXELS;

/// Keyboard key identifier.
///
/// Only keys the viewer binds are named; everything else is `Unknown` with the
/// platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Home,

    Shift,
    Control,
    Alt,
    Meta,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse wheel delta as reported by the platform.
///
/// `Line` counts notches (positive = away from the user); `Pixel` is a
/// high-precision offset in logical pixels (positive = content moves down).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical delta in pixels, positive when scrolling down.
    ///
    /// This is the `deltaY` a zoom command expects: positive zooms out.
    pub fn scroll_y(self) -> f64 {
        match self {
            MouseWheelDelta::Line { y, .. } => -(y as f64) * WHEEL_LINE_PIXELS,
            MouseWheelDelta::Pixel { y, .. } => -(y as f64),
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event, carrying the pointer position at the time of the press.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Pointer left the window surface.
    PointerLeft,

    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_lines_follow_browser_sign() {
        // one notch toward the user scrolls down and zooms out
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: -1.0 }.scroll_y(), 100.0);
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: 2.0 }.scroll_y(), -200.0);
    }

    #[test]
    fn wheel_pixels_are_negated() {
        assert_eq!(MouseWheelDelta::Pixel { x: 3.0, y: 12.5 }.scroll_y(), -12.5);
    }
}
