//! Settings loader - optional YAML file, overridden from the command line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};
use crate::orbit::OrbitConstant;
use crate::system::SystemKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub view: ViewSettings,
    pub render: RenderSettings,
    /// Zero-based index of the map shown at startup.
    pub starting_system: usize,
    pub orbit_constant: OrbitConstant,
    pub screenshot_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub title: String,
    pub target_fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub initial_zoom: f64,
    /// Zoom restored by the reset key.
    pub reset_zoom: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub max_iterations: u32,
    pub escape_radius_sq: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            view: ViewSettings::default(),
            render: RenderSettings::default(),
            starting_system: SystemKind::DoublePendulum.index(),
            orbit_constant: OrbitConstant::Seed,
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fullscreen: false,
            title: "Double Pendulum Fractal".to_string(),
            target_fps: 60,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            initial_zoom: 200.0,
            reset_zoom: 100.0,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            escape_radius_sq: 1000.0,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ExplorerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_system >= SystemKind::COUNT {
            return Err(ExplorerError::InvalidSetting(format!(
                "starting_system must be below {}, got {}",
                SystemKind::COUNT,
                self.starting_system
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ExplorerError::InvalidSetting(
                "window size must be non-zero".to_string(),
            ));
        }
        if self.window.target_fps == 0 {
            return Err(ExplorerError::InvalidSetting(
                "target_fps must be non-zero".to_string(),
            ));
        }
        if !(self.view.initial_zoom > 0.0 && self.view.reset_zoom > 0.0) {
            return Err(ExplorerError::InvalidSetting(
                "zoom levels must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.starting_system, 8);
        assert_eq!(settings.render.max_iterations, 200);
        assert_eq!(settings.view.reset_zoom, 100.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("starting_system: 0\nwindow:\n  width: 800\n").unwrap();
        assert_eq!(settings.starting_system, 0);
        assert_eq!(settings.window.width, 800);
        assert_eq!(settings.window.height, 1080);
        assert_eq!(settings.orbit_constant, OrbitConstant::Seed);
    }

    #[test]
    fn test_fixed_orbit_constant() {
        let settings =
            Settings::from_yaml("orbit_constant: !fixed\n  x: 0.25\n  y: -0.5\n").unwrap();
        assert_eq!(settings.orbit_constant, OrbitConstant::Fixed { x: 0.25, y: -0.5 });
    }

    #[test]
    fn test_out_of_range_system_rejected() {
        assert!(matches!(
            Settings::from_yaml("starting_system: 9\n"),
            Err(ExplorerError::InvalidSetting(_))
        ));
    }
}
