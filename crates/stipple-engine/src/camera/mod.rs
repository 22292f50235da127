//! Interactive 2-D camera: pan offset, rotation and zoom, plus the gesture
//! state machine that turns clip-space pointer input into camera moves.

mod controller;
mod state;

pub use controller::{CameraController, GestureSession, PanState};
pub use state::{Camera, MAX_ZOOM, MIN_ZOOM, ZOOM_SENSITIVITY};
