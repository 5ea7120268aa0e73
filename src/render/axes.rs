//! Axis ticks and cell placement
//!
//! Data indices are zero-based; labels shown to the reader start at 1.
//! The vertical axis is inverted: row 0 takes the top band, so band index
//! and row index are the same.

use crate::error::HeatmapError;

/// Pixel range `[start, end)` of cell `index` when `cells` cells share
/// `length` pixels starting at `origin`. Neighbouring bands never overlap
/// and together cover the whole length.
pub fn band(index: usize, cells: usize, origin: u32, length: u32) -> (u32, u32) {
    let edge = |i: usize| origin + ((i as u64 * length as u64) / cells as u64) as u32;
    (edge(index), edge(index + 1))
}

/// Center pixel of a band, for tick marks and labels.
pub fn band_center(index: usize, cells: usize, origin: u32, length: u32) -> f32 {
    let (start, end) = band(index, cells, origin, length);
    (start as f32 + end as f32) / 2.0
}

/// Tick on every cell if labels fit, otherwise on every k-th cell for the
/// smallest k that leaves `label_extent` pixels per tick.
pub fn tick_positions(cells: usize, length: u32, label_extent: u32) -> Vec<usize> {
    if cells == 0 {
        return Vec::new();
    }
    let cell_extent = length as f64 / cells as f64;
    let mut stride = 1;
    while stride < cells && (stride as f64) * cell_extent < label_extent as f64 {
        stride += 1;
    }
    (0..cells).step_by(stride).collect()
}

/// One-based labels for zero-based tick positions. A tick outside the grid
/// would mislabel the axis, so it is rejected.
pub fn tick_labels(positions: &[usize], cells: usize) -> Result<Vec<String>, HeatmapError> {
    positions
        .iter()
        .map(|&pos| {
            if pos < cells {
                Ok((pos + 1).to_string())
            } else {
                Err(HeatmapError::Shape(format!(
                    "tick at index {} but the axis has {} cells",
                    pos, cells
                )))
            }
        })
        .collect()
}
