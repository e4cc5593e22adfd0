//! Overlay toggles

use crate::config::DisplayConfig;
use bitflags::bitflags;

bitflags! {
    /// Which overlays are drawn each frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u32 {
        /// Ground grid
        const SHOW_GRID = 1 << 0;
        /// Frame time and FPS line
        const SHOW_FPS = 1 << 1;
        /// Camera position line
        const SHOW_CAMERA_POSITION = 1 << 2;
        /// Entity and proxy counts
        const SHOW_DIAGNOSTICS = 1 << 3;
        /// Proxy wireframes
        const SHOW_DEBUG_DRAW = 1 << 4;
    }
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for DisplayFlags {
    fn from(config: &DisplayConfig) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::SHOW_GRID, config.show_grid);
        flags.set(Self::SHOW_FPS, config.show_fps);
        flags.set(Self::SHOW_CAMERA_POSITION, config.show_camera_position);
        flags.set(Self::SHOW_DIAGNOSTICS, config.show_diagnostics);
        flags.set(Self::SHOW_DEBUG_DRAW, config.show_debug_draw);
        flags
    }
}
