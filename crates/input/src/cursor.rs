use glam::Vec2;

/// Remembers the previous cursor position and turns absolute positions into
/// look deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `position` and return the delta since the previous one, with
    /// the vertical axis inverted so moving the cursor up yields positive y.
    ///
    /// Returns `None` for the first position after construction or
    /// [`CursorTracker::reset`]; that position only becomes the baseline.
    pub fn offset(&mut self, position: Vec2) -> Option<Vec2> {
        let previous = self.last.replace(position)?;
        Some(Vec2::new(position.x - previous.x, previous.y - position.y))
    }

    /// Forget the baseline so the next position cannot cause a jump.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<Vec2> {
        self.last
    }
}
