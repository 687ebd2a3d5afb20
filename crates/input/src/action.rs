use cubeview_camera::Direction;
use glam::Vec2;

/// A high-level input action consumed by the [`crate::CameraController`].
///
/// Desktop windows and replay scripts both produce actions, so the camera
/// logic is identical whether it runs interactively or headless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// A movement key went down.
    Press(Direction),
    /// A movement key was released.
    Release(Direction),
    /// Absolute cursor position in window pixels (y grows downward).
    CursorMoved(Vec2),
    /// Look delta that is already inverted (positive y looks up).
    Look(Vec2),
    /// Vertical scroll amount in lines.
    Scroll(f32),
    /// Advance held-key movement by this many seconds.
    Tick(f32),
    /// Window lost focus: drop held keys and the cursor baseline.
    FocusLost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_carry_direction() {
        let a = Action::Press(Direction::Forward);
        assert!(matches!(a, Action::Press(Direction::Forward)));
        let b = Action::Release(Direction::Left);
        assert!(matches!(b, Action::Release(Direction::Left)));
    }

    #[test]
    fn cursor_and_look_are_distinct() {
        let p = Vec2::new(10.0, 20.0);
        assert_ne!(Action::CursorMoved(p), Action::Look(p));
    }
}
