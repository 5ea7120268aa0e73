//! Raster figure: heatmap cells, colorbar, ticks and text on one RGB canvas

use super::axes::{band, band_center};
use super::colormap::{ColorScale, coolwarm};
use crate::constants::{
    AXIS_COLOR, BACKGROUND_COLOR, CAPTION_GAP, CAPTION_SCALE, COLORBAR_GAP, COLORBAR_TICKS,
    COLORBAR_WIDTH, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, TEXT_COLOR,
    TICK_LABEL_GAP, TICK_LENGTH, TICK_SCALE, TITLE_SCALE,
};
use crate::error::HeatmapError;
use crate::grid::HitRateGrid;
use ab_glyph::{FontRef, PxScale};
use image::{RgbImage, imageops};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;
use std::path::Path;

const FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

pub fn load_font() -> Result<FontRef<'static>, HeatmapError> {
    FontRef::try_from_slice(FONT_DATA).map_err(|e| HeatmapError::Font(e.to_string()))
}

/// Region of the canvas holding the cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotArea {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PlotArea {
    /// Plot area left after margins, or `None` when the canvas is too small.
    pub fn for_canvas(width: u32, height: u32) -> Option<Self> {
        let plot_width = width.checked_sub(MARGIN_LEFT + MARGIN_RIGHT)?;
        let plot_height = height.checked_sub(MARGIN_TOP + MARGIN_BOTTOM)?;
        if plot_width == 0 || plot_height == 0 {
            return None;
        }
        Some(Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: plot_width,
            height: plot_height,
        })
    }

    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// One image being drawn. Dropping it frees the pixel buffer.
pub struct Figure<'f> {
    canvas: RgbImage,
    font: &'f FontRef<'static>,
    plot: PlotArea,
    // Widest y tick label, so the caption clears it
    y_label_width: u32,
}

impl<'f> Figure<'f> {
    pub fn new(width: u32, height: u32, font: &'f FontRef<'static>) -> Result<Self, HeatmapError> {
        let plot = PlotArea::for_canvas(width, height).ok_or_else(|| {
            HeatmapError::Shape(format!("{}x{} canvas leaves no room to plot", width, height))
        })?;
        Ok(Self {
            canvas: RgbImage::from_pixel(width, height, BACKGROUND_COLOR),
            font,
            plot,
            y_label_width: 0,
        })
    }

    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    /// Rendered size of `text` at `scale` pixels.
    pub fn text_size(&self, text: &str, scale: f32) -> (u32, u32) {
        text_size(PxScale::from(scale), self.font, text)
    }

    /// Fill one rectangle per cell, row 0 on top. Blank (NaN) cells keep
    /// the background.
    pub fn draw_cells(
        &mut self,
        grid: &HitRateGrid,
        scale: &ColorScale,
    ) -> Result<(), HeatmapError> {
        let plot = self.plot;
        if grid.cols() as u32 > plot.width || grid.rows() as u32 > plot.height {
            return Err(HeatmapError::Shape(format!(
                "{}x{} grid does not fit in a {}x{} plot area",
                grid.rows(),
                grid.cols(),
                plot.width,
                plot.height
            )));
        }

        for row in 0..grid.rows() {
            let (y0, y1) = band(row, grid.rows(), plot.top, plot.height);
            for col in 0..grid.cols() {
                let value = grid.get(row, col);
                if !value.is_finite() {
                    continue;
                }
                let (x0, x1) = band(col, grid.cols(), plot.left, plot.width);
                let rect = Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0);
                draw_filled_rect_mut(&mut self.canvas, rect, scale.color(value));
            }
        }
        Ok(())
    }

    /// Tick marks and labels under the plot area.
    pub fn draw_x_ticks(&mut self, positions: &[usize], labels: &[String], cols: usize) {
        let plot = self.plot;
        let y = plot.bottom() as f32;
        for (&pos, label) in positions.iter().zip(labels) {
            let cx = band_center(pos, cols, plot.left, plot.width);
            draw_line_segment_mut(
                &mut self.canvas,
                (cx, y),
                (cx, y + TICK_LENGTH as f32),
                AXIS_COLOR,
            );
            let (w, _) = self.text_size(label, TICK_SCALE);
            let x = cx - w as f32 / 2.0;
            let top = y + (TICK_LENGTH + TICK_LABEL_GAP) as f32;
            self.draw_text(label, TICK_SCALE, x as i32, top as i32);
        }
    }

    /// Tick marks and labels left of the plot area, first row on top.
    pub fn draw_y_ticks(&mut self, positions: &[usize], labels: &[String], rows: usize) {
        let plot = self.plot;
        let x = plot.left as f32;
        for (&pos, label) in positions.iter().zip(labels) {
            let cy = band_center(pos, rows, plot.top, plot.height);
            draw_line_segment_mut(
                &mut self.canvas,
                (x - TICK_LENGTH as f32, cy),
                (x, cy),
                AXIS_COLOR,
            );
            let (w, h) = self.text_size(label, TICK_SCALE);
            self.y_label_width = self.y_label_width.max(w);
            let left = x - (TICK_LENGTH + TICK_LABEL_GAP + w) as f32;
            self.draw_text(label, TICK_SCALE, left as i32, (cy - h as f32 / 2.0) as i32);
        }
    }

    /// Vertical gradient bar right of the plot: `scale.max` on top,
    /// `scale.min` at the bottom, with value ticks and a rotated caption.
    pub fn draw_colorbar(&mut self, scale: &ColorScale, caption: &str) {
        let plot = self.plot;
        let left = plot.right() + COLORBAR_GAP;
        let height = plot.height;

        for dy in 0..height {
            let t = if height > 1 {
                1.0 - dy as f64 / (height - 1) as f64
            } else {
                0.5
            };
            let rect = Rect::at(left as i32, (plot.top + dy) as i32).of_size(COLORBAR_WIDTH, 1);
            draw_filled_rect_mut(&mut self.canvas, rect, coolwarm(t));
        }
        let outline = Rect::at(left as i32, plot.top as i32).of_size(COLORBAR_WIDTH, height);
        draw_hollow_rect_mut(&mut self.canvas, outline, AXIS_COLOR);

        let bar_right = (left + COLORBAR_WIDTH) as f32;
        let mut widest = 0;
        for i in 0..COLORBAR_TICKS {
            let frac = i as f64 / (COLORBAR_TICKS - 1) as f64;
            let value = scale.min + (scale.max - scale.min) * frac;
            let y = plot.bottom() as f32 - 1.0 - frac as f32 * (height - 1) as f32;
            draw_line_segment_mut(
                &mut self.canvas,
                (bar_right, y),
                (bar_right + TICK_LENGTH as f32, y),
                AXIS_COLOR,
            );
            let label = format!("{:.2}", value);
            let (w, h) = self.text_size(&label, TICK_SCALE);
            widest = widest.max(w);
            let x = bar_right + (TICK_LENGTH + TICK_LABEL_GAP) as f32;
            self.draw_text(&label, TICK_SCALE, x as i32, (y - h as f32 / 2.0) as i32);
        }

        let (_, caption_h) = self.text_size(caption, CAPTION_SCALE);
        let caption_offset = TICK_LENGTH + TICK_LABEL_GAP + widest + CAPTION_GAP + caption_h / 2;
        let cx = bar_right + caption_offset as f32;
        let cy = plot.top as f32 + plot.height as f32 / 2.0;
        self.draw_text_vertical(caption, CAPTION_SCALE, cx, cy);
    }

    /// Title centered above the plot area.
    pub fn draw_title(&mut self, title: &str) {
        let plot = self.plot;
        let (w, h) = self.text_size(title, TITLE_SCALE);
        let x = plot.left as f32 + (plot.width as f32 - w as f32) / 2.0;
        let y = (plot.top.saturating_sub(h)) / 2;
        self.draw_text(title, TITLE_SCALE, x.max(0.0) as i32, y as i32);
    }

    /// Caption centered under the x tick labels.
    pub fn draw_x_caption(&mut self, caption: &str) {
        let plot = self.plot;
        let (_, tick_h) = self.text_size("0", TICK_SCALE);
        let (w, _) = self.text_size(caption, CAPTION_SCALE);
        let x = plot.left as f32 + (plot.width as f32 - w as f32) / 2.0;
        let y = plot.bottom() + TICK_LENGTH + TICK_LABEL_GAP + tick_h + CAPTION_GAP;
        self.draw_text(caption, CAPTION_SCALE, x.max(0.0) as i32, y as i32);
    }

    /// Rotated caption left of the y tick labels. Call after `draw_y_ticks`.
    pub fn draw_y_caption(&mut self, caption: &str) {
        let plot = self.plot;
        let (_, h) = self.text_size(caption, CAPTION_SCALE);
        let offset = TICK_LENGTH + TICK_LABEL_GAP + self.y_label_width + CAPTION_GAP + h / 2;
        let cx = (plot.left as f32 - offset as f32).max(h as f32 / 2.0);
        let cy = plot.top as f32 + plot.height as f32 / 2.0;
        self.draw_text_vertical(caption, CAPTION_SCALE, cx, cy);
    }

    /// Write the canvas as PNG, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), HeatmapError> {
        self.canvas
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| HeatmapError::Save {
                path: path.to_path_buf(),
                source,
            })
    }

    fn draw_text(&mut self, text: &str, scale: f32, x: i32, y: i32) {
        draw_text_mut(
            &mut self.canvas,
            TEXT_COLOR,
            x,
            y,
            PxScale::from(scale),
            self.font,
            text,
        );
    }

    /// Text reading bottom to top, centered on (`cx`, `cy`).
    fn draw_text_vertical(&mut self, text: &str, scale: f32, cx: f32, cy: f32) {
        let (w, _) = self.text_size(text, scale);
        // Full line height so descenders are not clipped
        let line_h = scale.ceil() as u32 + 4;
        let mut label = RgbImage::from_pixel(w + 4, line_h, BACKGROUND_COLOR);
        draw_text_mut(
            &mut label,
            TEXT_COLOR,
            2,
            2,
            PxScale::from(scale),
            self.font,
            text,
        );
        let rotated = imageops::rotate270(&label);
        let x = cx - rotated.width() as f32 / 2.0;
        let y = cy - rotated.height() as f32 / 2.0;
        imageops::replace(&mut self.canvas, &rotated, x as i64, y as i64);
    }
}
