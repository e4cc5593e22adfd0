//! Editor configuration

use super::Config;
use crate::picking::{PickMode, PickingCoordinator};
use crate::render::CameraSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Scene snapshot loaded at startup and written at shutdown
    pub scene_path: PathBuf,
    /// Main window
    pub window: WindowConfig,
    /// Initial camera, also used when a scene file has no camera record
    pub camera: CameraSettings,
    /// Picking behavior
    pub picking: PickingConfig,
    /// Overlay defaults
    pub display: DisplayConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("scenes/scene.json"),
            window: WindowConfig::default(),
            camera: CameraSettings::default(),
            picking: PickingConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config for EditorConfig {}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pixel Editor".to_string(),
            width: 1400,
            height: 900,
        }
    }
}

/// Picking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Intersection test used for clicks
    pub mode: PickMode,
    /// Ray length for proxy casts
    pub max_distance: f32,
    /// Window position of the viewport's top-left pixel
    pub viewport_offset: [f32; 2],
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            mode: PickMode::default(),
            max_distance: 1000.0,
            viewport_offset: [16.0, 50.0],
        }
    }
}

impl PickingConfig {
    /// Build the coordinator these settings describe
    pub fn coordinator(&self) -> PickingCoordinator {
        let [x, y] = self.viewport_offset;
        PickingCoordinator::new(self.mode, self.max_distance, (x, y))
    }
}

/// Which overlays are on at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayConfig {
    /// Ground grid
    pub show_grid: bool,
    /// Frame time and FPS line
    pub show_fps: bool,
    /// Camera position line
    pub show_camera_position: bool,
    /// Entity and proxy counts
    pub show_diagnostics: bool,
    /// Proxy wireframes
    pub show_debug_draw: bool,
    /// Grid cells along X and Z
    pub grid_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_fps: false,
            show_camera_position: true,
            show_diagnostics: false,
            show_debug_draw: false,
            grid_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixel_engine_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EditorConfig = toml::from_str(
            r#"
            scene_path = "levels/test.json"

            [picking]
            mode = "obb"

            [window]
            width = 800
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.scene_path, PathBuf::from("levels/test.json"));
        assert_eq!(config.picking.mode, PickMode::Obb);
        assert_eq!(config.picking.max_distance, 1000.0);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 900);
        assert!(config.display.show_grid);
    }

    #[test]
    fn test_save_and_load_toml_and_ron() {
        let mut config = EditorConfig::default();
        config.camera.fov = 60.0;
        config.display.show_debug_draw = true;

        for name in ["editor.toml", "editor.ron"] {
            let path = temp_file(name);
            config.save_to_file(&path).expect("save succeeds");
            let loaded = EditorConfig::load_from_file(&path).expect("load succeeds");
            let _ = std::fs::remove_file(&path);
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = EditorConfig::default().save_to_file(temp_file("editor.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = EditorConfig::load_or_default(temp_file("absent.toml"));
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_coordinator_from_settings() {
        let coordinator = PickingConfig::default().coordinator();
        assert_eq!(coordinator.viewport_offset, (16.0, 50.0));
        assert_eq!(coordinator.mode, PickMode::Proxy);
    }
}
