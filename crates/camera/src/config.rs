use serde::{Deserialize, Serialize};

/// Tunable camera parameters, typically read from the app config file.
///
/// `mouse_sensitivity` is the user-facing value; the camera multiplies it
/// by [`crate::MOUSE_SENSITIVITY_SCALING`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World units per second.
    pub movement_speed: f32,
    /// Unscaled multiplier applied to raw cursor deltas.
    pub mouse_sensitivity: f32,
    /// Degrees of FOV change per scroll unit.
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            mouse_sensitivity: 1.0,
            zoom_sensitivity: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CameraConfig::default();
        assert_eq!(cfg.movement_speed, 10.0);
        assert_eq!(cfg.mouse_sensitivity, 1.0);
        assert_eq!(cfg.zoom_sensitivity, 5.0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: CameraConfig = serde_yaml::from_str("movement_speed: 2.5\n").unwrap();
        assert_eq!(cfg.movement_speed, 2.5);
        assert_eq!(cfg.zoom_sensitivity, 5.0);
    }
}
