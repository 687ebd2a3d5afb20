use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Narrowest vertical field of view, in degrees.
pub const MIN_VERTICAL_FOV: f32 = 1.0;
/// Widest vertical field of view, in degrees. Also the starting FOV.
pub const MAX_VERTICAL_FOV: f32 = 78.0;
/// Pitch limit in degrees, keeps `front` away from the poles.
pub const MAX_PITCH: f32 = 89.0;
/// Factor applied to the configured mouse sensitivity.
pub const MOUSE_SENSITIVITY_SCALING: f32 = 0.05;
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 100.0;

const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
const START_YAW: f32 = -90.0;

/// Movement directions accepted by [`Camera::process_camera_movement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a lowercase direction name as produced by [`Direction::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// Free-fly camera driven by yaw/pitch mouse look and scroll zoom.
///
/// Angles are stored in degrees. All mutations clamp, so the camera has no
/// failure modes; the only caller obligation is a non-zero viewport height
/// when asking for a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    up: Vec3,
    vertical_fov: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CameraConfig) -> Self {
        Self {
            position: START_POSITION,
            yaw: START_YAW,
            pitch: 0.0,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            vertical_fov: MAX_VERTICAL_FOV,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity * MOUSE_SENSITIVITY_SCALING,
            zoom_sensitivity: config.zoom_sensitivity,
        }
    }

    /// Apply a cursor delta. `dy` is positive when the cursor moved up.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.update_front();
    }

    /// Narrow (positive `scroll_dy`) or widen the field of view.
    pub fn process_zooming(&mut self, scroll_dy: f32) {
        self.vertical_fov = (self.vertical_fov - scroll_dy * self.zoom_sensitivity)
            .clamp(MIN_VERTICAL_FOV, MAX_VERTICAL_FOV);
        tracing::trace!(fov = self.vertical_fov, "zoom");
    }

    /// Move for `dt` seconds at the configured speed.
    ///
    /// `Left` moves along [`Camera::right`] and `Right` against it. Because
    /// `right` is `up x front`, that vector points to the viewer's left, so
    /// the keys still move the way their names say.
    pub fn process_camera_movement(&mut self, direction: Direction, dt: f32) {
        debug_assert!(dt >= 0.0, "negative frame time {dt}");
        let velocity = self.movement_speed * dt;
        match direction {
            Direction::Up => self.position += self.up * velocity,
            Direction::Down => self.position -= self.up * velocity,
            Direction::Forward => self.position += self.front * velocity,
            Direction::Backward => self.position -= self.front * velocity,
            Direction::Left => self.position += self.right() * velocity,
            Direction::Right => self.position -= self.right() * velocity,
        }
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        tracing::debug!(speed, "camera movement speed set");
        self.movement_speed = speed;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-convention perspective (clip z in [-1, 1]) for the given
    /// viewport. `height` must be greater than zero.
    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        debug_assert!(height > 0.0, "zero-height viewport");
        Mat4::perspective_rh_gl(
            self.vertical_fov.to_radians(),
            width / height,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    /// `normalize(up x front)`.
    pub fn right(&self) -> Vec3 {
        self.up.cross(self.front).normalize()
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn vertical_fov(&self) -> f32 {
        self.vertical_fov
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// Effective sensitivity, already multiplied by the scaling constant.
    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn zoom_sensitivity(&self) -> f32 {
        self.zoom_sensitivity
    }

    fn update_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }
}
