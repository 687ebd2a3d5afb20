use std::collections::BTreeSet;

use cubeview_camera::{Camera, Direction};

use crate::action::Action;
use crate::cursor::CursorTracker;

/// Set of movement keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: BTreeSet<Direction>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.held.insert(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.held.iter().copied()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Drives a [`Camera`] from input actions.
///
/// Owns the state the render loop needs between events: which movement
/// keys are held and where the cursor was last seen.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    keys: HeldKeys,
    cursor: CursorTracker,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action to the camera.
    pub fn handle(&mut self, action: Action, camera: &mut Camera) {
        match action {
            Action::Press(direction) => self.keys.press(direction),
            Action::Release(direction) => self.keys.release(direction),
            Action::CursorMoved(position) => {
                if let Some(delta) = self.cursor.offset(position) {
                    camera.process_mouse_movement(delta.x, delta.y);
                }
            }
            Action::Look(delta) => camera.process_mouse_movement(delta.x, delta.y),
            Action::Scroll(dy) => camera.process_zooming(dy),
            Action::Tick(dt) => self.update(camera, dt),
            Action::FocusLost => {
                tracing::debug!("focus lost, releasing held keys");
                self.keys.clear();
                self.cursor.reset();
            }
        }
    }

    /// Per-frame step: move the camera for every held key.
    pub fn update(&self, camera: &mut Camera, dt: f32) {
        for direction in self.keys.iter() {
            camera.process_camera_movement(direction, dt);
        }
    }

    pub fn keys(&self) -> &HeldKeys {
        &self.keys
    }

    pub fn cursor(&self) -> &CursorTracker {
        &self.cursor
    }

    /// Forget the cursor baseline, e.g. after re-grabbing the pointer.
    pub fn reset_cursor(&mut self) {
        self.cursor.reset();
    }
}
