//! Hit-rate grids loaded from headerless CSV tables
//!
//! Rows are NPC levels and columns are PC levels. The simulator ends every
//! row with a comma, so the last column is an empty filler that gets dropped
//! before plotting.

use crate::error::HeatmapError;
use std::io;
use std::path::Path;

/// Row-major grid of hit rates. Empty cells load as NaN and are left blank
/// when rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRateGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Cells holding a finite value
    pub filled: usize,
}

impl HitRateGrid {
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, HeatmapError> {
        if values.len() != rows * cols {
            return Err(HeatmapError::Shape(format!(
                "{} values do not fill a {}x{} grid",
                values.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, values })
    }

    /// Load a CSV file with no header row.
    pub fn load(path: &Path) -> Result<Self, HeatmapError> {
        let file = std::fs::File::open(path).map_err(|e| HeatmapError::load(path, e))?;
        Self::from_reader(file, path)
    }

    /// Parse CSV from any reader; `path` only labels errors.
    pub fn from_reader<R: io::Read>(reader: R, path: &Path) -> Result<Self, HeatmapError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .from_reader(reader);

        let mut rows = 0;
        let mut cols = 0;
        let mut values = Vec::new();

        for (row, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| HeatmapError::load(path, e))?;
            if row == 0 {
                cols = record.len();
            }
            for (col, field) in record.iter().enumerate() {
                values.push(parse_cell(field).ok_or_else(|| {
                    HeatmapError::load(
                        path,
                        format!(
                            "row {}, column {}: {:?} is not a number",
                            row + 1,
                            col + 1,
                            field
                        ),
                    )
                })?);
            }
            rows += 1;
        }

        Self::new(rows, cols, values)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[self.index(row, col)]
    }

    /// Drop the trailing column. The result must still have at least one
    /// row and one column.
    pub fn without_last_column(&self) -> Result<Self, HeatmapError> {
        if self.cols == 0 {
            return Err(HeatmapError::Shape("grid has no columns".to_string()));
        }
        let cols = self.cols - 1;
        if cols == 0 || self.rows == 0 {
            return Err(HeatmapError::Shape(format!(
                "nothing left to plot: {}x{} grid after dropping the last column",
                self.rows, cols
            )));
        }

        let values = self
            .values
            .chunks(self.cols)
            .flat_map(|row| row[..cols].iter().copied())
            .collect();
        Ok(Self {
            rows: self.rows,
            cols,
            values,
        })
    }

    /// Min, max and mean over finite cells; `None` when every cell is blank.
    pub fn stats(&self) -> Option<GridStats> {
        let finite: Vec<f64> = self
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return None;
        }
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        Some(GridStats {
            min,
            max,
            mean,
            filled: finite.len(),
        })
    }
}

fn parse_cell(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(f64::NAN);
    }
    field.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<HitRateGrid, HeatmapError> {
        HitRateGrid::from_reader(content.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_trailing_comma_rows() {
        let grid = parse("0.5,0.25,\n0.75,1,\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert!(grid.get(0, 2).is_nan());

        let trimmed = grid.without_last_column().unwrap();
        assert_eq!((trimmed.rows(), trimmed.cols()), (2, 2));
        assert_eq!(trimmed.get(0, 0), 0.5);
        assert_eq!(trimmed.get(1, 1), 1.0);
    }

    #[test]
    fn test_four_by_five_trims_to_four_by_four() {
        let content = "1,2,3,4,5\n6,7,8,9,10\n11,12,13,14,15\n16,17,18,19,20\n";
        let grid = parse(content).unwrap().without_last_column().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (4, 4));
        assert_eq!(grid.get(3, 3), 19.0);
        assert_eq!(grid.get(1, 0), 6.0);
    }

    #[test]
    fn test_non_numeric_cell() {
        let err = parse("0.1,abc,\n").unwrap_err();
        match err {
            HeatmapError::Load { reason, .. } => assert!(reason.contains("row 1, column 2")),
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_rows() {
        assert!(matches!(
            parse("1,2,3\n4,5\n"),
            Err(HeatmapError::Load { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = HitRateGrid::load(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, HeatmapError::Load { .. }));
    }

    #[test]
    fn test_empty_and_single_column() {
        let empty = parse("").unwrap();
        assert!(matches!(empty.without_last_column(), Err(HeatmapError::Shape(_))));

        let single = parse("0.5\n0.6\n").unwrap();
        assert!(matches!(single.without_last_column(), Err(HeatmapError::Shape(_))));
    }

    #[test]
    fn test_stats_skip_blank_cells() {
        let grid = parse("0.2,,0.6\n").unwrap();
        let stats = grid.stats().unwrap();
        assert_eq!(stats.filled, 2);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.6);
        assert!((stats.mean - 0.4).abs() < 1e-12);

        let blank = parse(",\n").unwrap();
        assert!(blank.stats().is_none());
    }

    #[test]
    fn test_new_rejects_mismatched_len() {
        assert!(matches!(
            HitRateGrid::new(2, 2, vec![0.0; 3]),
            Err(HeatmapError::Shape(_))
        ));
    }
}
