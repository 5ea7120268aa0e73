//! Heatmap drawing
//!
//! This module provides:
//! - `colormap`: the diverging coolwarm scale
//! - `axes`: cell bands, tick placement and one-based labels
//! - `figure`: the raster canvas everything is drawn on

pub mod axes;
pub mod colormap;
pub mod figure;

pub use axes::{tick_labels, tick_positions};
pub use colormap::{ColorScale, coolwarm};
pub use figure::{Figure, PlotArea, load_font};

use crate::constants::{COLORBAR_CAPTION, TICK_SCALE, X_CAPTION, Y_CAPTION};
use crate::error::HeatmapError;
use crate::grid::HitRateGrid;

/// Space kept free around each tick label
const TICK_LABEL_PADDING: u32 = 6;

/// Draw a complete heatmap of `grid` onto `figure`: cells with row 0 on
/// top, one-based ticks on both axes, colorbar, title and captions.
pub fn draw_heatmap(
    figure: &mut Figure<'_>,
    grid: &HitRateGrid,
    title: &str,
) -> Result<(), HeatmapError> {
    let stats = grid
        .stats()
        .ok_or_else(|| HeatmapError::Shape("grid has no numeric cells".to_string()))?;
    let scale = ColorScale::new(stats.min, stats.max);
    let plot = figure.plot_area();

    figure.draw_cells(grid, &scale)?;

    // Widest label belongs to the highest index
    let (x_label_w, _) = figure.text_size(&grid.cols().to_string(), TICK_SCALE);
    let x_ticks = tick_positions(grid.cols(), plot.width, x_label_w + TICK_LABEL_PADDING);
    let x_labels = tick_labels(&x_ticks, grid.cols())?;
    figure.draw_x_ticks(&x_ticks, &x_labels, grid.cols());

    let (_, y_label_h) = figure.text_size(&grid.rows().to_string(), TICK_SCALE);
    let y_ticks = tick_positions(grid.rows(), plot.height, y_label_h + TICK_LABEL_PADDING);
    let y_labels = tick_labels(&y_ticks, grid.rows())?;
    figure.draw_y_ticks(&y_ticks, &y_labels, grid.rows());

    figure.draw_colorbar(&scale, COLORBAR_CAPTION);
    figure.draw_title(title);
    figure.draw_x_caption(X_CAPTION);
    figure.draw_y_caption(Y_CAPTION);
    Ok(())
}
