use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cubeview_camera::CameraConfig;
use serde::{Deserialize, Serialize};

/// Movement speed the desktop viewer starts with.
const DESKTOP_MOVEMENT_SPEED: f32 = 2.0;

/// Top-level viewer configuration. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraSection,
    pub assets: AssetPaths,
}

/// The `camera` section. Same keys as [`CameraConfig`], but a missing key
/// takes the viewer's default rather than the library's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        let library = CameraConfig::default();
        Self {
            movement_speed: DESKTOP_MOVEMENT_SPEED,
            mouse_sensitivity: library.mouse_sensitivity,
            zoom_sensitivity: library.zoom_sensitivity,
        }
    }
}

impl From<CameraSection> for CameraConfig {
    fn from(section: CameraSection) -> Self {
        Self {
            movement_speed: section.movement_speed,
            mouse_sensitivity: section.mouse_sensitivity,
            zoom_sensitivity: section.zoom_sensitivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "cubeview".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub diffuse: PathBuf,
    pub specular: PathBuf,
    /// WGSL override; the built-in lighting shader is used when unset.
    pub shader: Option<PathBuf>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            diffuse: PathBuf::from("assets/container2.png"),
            specular: PathBuf::from("assets/container2_specular.png"),
            shader: None,
        }
    }
}

impl AppConfig {
    /// Read a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values given on the command line, applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub speed: Option<f32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub diffuse: Option<PathBuf>,
    pub specular: Option<PathBuf>,
    pub shader: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(speed) = self.speed {
            config.camera.movement_speed = speed;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(diffuse) = self.diffuse {
            config.assets.diffuse = diffuse;
        }
        if let Some(specular) = self.specular {
            config.assets.specular = specular;
        }
        if self.shader.is_some() {
            config.assets.shader = self.shader;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.window.width, 1920);
        assert_eq!(cfg.window.height, 1080);
        assert_eq!(cfg.camera.movement_speed, 2.0);
        assert_eq!(cfg.camera.zoom_sensitivity, 5.0);
        assert!(cfg.assets.shader.is_none());
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  width: 800\ncamera:\n  mouse_sensitivity: 2.0").unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 1080);
        assert_eq!(cfg.camera.mouse_sensitivity, 2.0);
        // Keys absent from a present section still take the viewer default.
        assert_eq!(cfg.camera.movement_speed, 2.0);
        assert_eq!(cfg.camera.zoom_sensitivity, 5.0);
        assert_eq!(cfg.assets, AssetPaths::default());
    }

    #[test]
    fn camera_section_converts() {
        let section = CameraSection {
            movement_speed: 3.0,
            ..CameraSection::default()
        };
        let config = CameraConfig::from(section);
        assert_eq!(config.movement_speed, 3.0);
        assert_eq!(config.mouse_sensitivity, 1.0);
        assert_eq!(config.zoom_sensitivity, 5.0);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = AppConfig::load("no/such/config.yaml").unwrap_err();
        assert!(err.to_string().contains("no/such/config.yaml"));
    }

    #[test]
    fn load_invalid_yaml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window: [not, a, map]").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn overrides_win() {
        let mut cfg = AppConfig::default();
        Overrides {
            speed: Some(7.5),
            height: Some(600),
            shader: Some(PathBuf::from("custom.wgsl")),
            ..Overrides::default()
        }
        .apply(&mut cfg);
        assert_eq!(cfg.camera.movement_speed, 7.5);
        assert_eq!(cfg.window.height, 600);
        assert_eq!(cfg.window.width, 1920);
        assert_eq!(cfg.assets.shader, Some(PathBuf::from("custom.wgsl")));
    }
}
