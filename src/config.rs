use std::{fs, path::Path};

use minifb::Scale;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const CONFIG_FILE: &str = "Sketch.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Integer window zoom: 1, 2, 4 or 8.
    pub window_scale: u8,
    pub target_fps: u32,
    /// Print a frame counter line once per second.
    pub stats: bool,
    /// Palette index painted pixels use.
    pub screen_fg: u8,
    /// Palette index of the empty canvas.
    pub screen_bg: u8,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            window_scale: 2,
            target_fps: 60,
            stats: true,
            screen_fg: 1, // black
            screen_bg: 7, // cyan
        }
    }
}

impl SketchConfig {
    /// Read `path`, or write the defaults there and use them.
    pub fn load_or_initialize(path: &Path) -> Result<SketchConfig, Error> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::ConfigRead(format!("{}: {e}", path.display())))?;
            return SketchConfig::parse(&content);
        }

        let config = SketchConfig::default();
        let toml = toml::to_string(&config).map_err(|e| Error::ConfigWrite(e.to_string()))?;
        fs::write(path, toml).map_err(|e| Error::ConfigWrite(format!("{}: {e}", path.display())))?;

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<SketchConfig, Error> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Unsupported zooms round down to the nearest one minifb offers.
    pub fn zoom(&self) -> u8 {
        match self.window_scale {
            0 | 1 => 1,
            2 | 3 => 2,
            4..=7 => 4,
            _ => 8,
        }
    }

    pub fn scale(&self) -> Scale {
        match self.zoom() {
            1 => Scale::X1,
            2 => Scale::X2,
            4 => Scale::X4,
            _ => Scale::X8,
        }
    }
}
