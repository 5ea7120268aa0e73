//! Error types for loading, rendering and saving heatmaps

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeatmapError {
    /// Input file missing, unreadable, ragged or holding a non-numeric cell
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// Grid or tick layout that cannot be plotted
    #[error("bad grid shape: {0}")]
    Shape(String),

    /// File name not of the form `{subject}_{target}_hit_rate.csv`
    #[error("cannot parse identifier {identifier:?}: {reason}")]
    Parse { identifier: String, reason: String },

    /// Output directory could not be created
    #[error("cannot create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load font: {0}")]
    Font(String),

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl HeatmapError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(identifier: &str, reason: impl ToString) -> Self {
        Self::Parse {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }
    }
}
