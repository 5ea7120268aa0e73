//! Run configuration
//!
//! Defaults reproduce the fixed batch: the eight simulator tables in the
//! working directory, rendered at 1000x800. A TOML file can override any
//! field; missing fields keep their defaults.

use crate::constants::{DEFAULT_FILES, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::HeatmapError;
use crate::render::PlotArea;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Table file names, rendered in this order
    pub files: Vec<String>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
    /// Log a failed file and move on instead of stopping the batch
    pub keep_going: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            keep_going: false,
        }
    }
}

impl RenderConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: &Path) -> Result<Self, HeatmapError> {
        let content = fs::read_to_string(path).map_err(|e| HeatmapError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml(&content).map_err(|reason| HeatmapError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if PlotArea::for_canvas(self.width, self.height).is_none() {
            return Err(format!(
                "{}x{} image leaves no room for the plot",
                self.width, self.height
            ));
        }
        Ok(())
    }

    pub fn input_path(&self, identifier: &str) -> PathBuf {
        self.input_dir.join(identifier)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
