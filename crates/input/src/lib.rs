//! Input: raw window events mapped onto camera actions.
//!
//! # Invariants
//! - The camera only ever sees actions, never window-system events.
//! - The first cursor position of a session is a baseline and never rotates
//!   the camera.
//! - Cursor and held-key state is owned by a [`CameraController`] value, not
//!   hidden in statics.

pub mod action;
mod controller;
mod cursor;
pub mod script;

pub use action::Action;
pub use controller::{CameraController, HeldKeys};
pub use cursor::CursorTracker;
pub use script::{InputError, parse_script};

pub fn crate_info() -> &'static str {
    "cubeview-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
