//! Free-fly camera: the orientation core of the cube viewer.
//!
//! # Invariants
//! - `front` is unit length and derived from yaw/pitch only.
//! - Pitch stays within [-89, 89] degrees, vertical FOV within [1, 78].
//! - `up` is fixed; the camera never rolls.
//! - Camera state lives outside the renderer and is never persisted.

mod camera;
mod config;

pub use camera::{
    Camera, Direction, FAR_PLANE, MAX_PITCH, MAX_VERTICAL_FOV, MIN_VERTICAL_FOV,
    MOUSE_SENSITIVITY_SCALING, NEAR_PLANE,
};
pub use config::CameraConfig;

pub fn crate_info() -> &'static str {
    "cubeview-camera v0.1.0"
}
