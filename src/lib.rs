//! Hitrate Heatmap - renders combat simulator hit-rate tables as PNG heatmaps
//!
//! Each table is a headerless CSV of hit rates (rows = NPC level, columns =
//! PC level). The crate loads, trims, renders and saves them one at a time.

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod identifier;
pub mod render;
pub mod renderer;

// Re-export commonly used types for convenience
pub use config::RenderConfig;
pub use error::HeatmapError;
pub use grid::{GridStats, HitRateGrid};
pub use identifier::FileIdentifier;
pub use renderer::{BatchReport, HeatmapRenderer};
