//! Fixed values for hit-rate heatmap rendering
//!
//! The default file list, captions and figure layout live here for easy tweaking.

use image::Rgb;

// =============================================================================
// INPUT FILES
// =============================================================================

/// Hit-rate tables written by the combat simulator, in render order.
/// PC-vs-NPC attack tables first, then NPC-vs-PC defense tables.
pub const DEFAULT_FILES: [&str; 8] = [
    "barbarian_NPC_hit_rate.csv",
    "cleric_NPC_hit_rate.csv",
    "rogue_NPC_hit_rate.csv",
    "wizard_NPC_hit_rate.csv",
    "NPC_barbarian_hit_rate.csv",
    "NPC_cleric_hit_rate.csv",
    "NPC_rogue_hit_rate.csv",
    "NPC_wizard_hit_rate.csv",
];

/// Every identifier ends with this suffix
pub const INPUT_SUFFIX: &str = "_hit_rate.csv";
pub const OUTPUT_SUFFIX: &str = "_hit_rate.png";

// =============================================================================
// CAPTIONS
// =============================================================================

pub const X_CAPTION: &str = "PC level";
pub const Y_CAPTION: &str = "NPC level";
pub const COLORBAR_CAPTION: &str = "Hit Rate";

// =============================================================================
// FIGURE LAYOUT (pixels)
// =============================================================================

// 10x8 inch figure at 100 dpi
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 800;

pub const MARGIN_TOP: u32 = 60;
pub const MARGIN_BOTTOM: u32 = 80;
pub const MARGIN_LEFT: u32 = 90;
pub const MARGIN_RIGHT: u32 = 150;

pub const COLORBAR_GAP: u32 = 30; // between plot area and colorbar
pub const COLORBAR_WIDTH: u32 = 25;
pub const COLORBAR_TICKS: usize = 5;

pub const TICK_LENGTH: u32 = 5;
pub const TICK_LABEL_GAP: u32 = 4;
pub const CAPTION_GAP: u32 = 12;

pub const TITLE_SCALE: f32 = 22.0;
pub const CAPTION_SCALE: f32 = 18.0;
pub const TICK_SCALE: f32 = 14.0;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const TEXT_COLOR: Rgb<u8> = Rgb([20, 20, 20]);
pub const AXIS_COLOR: Rgb<u8> = Rgb([40, 40, 40]);
