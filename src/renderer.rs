//! Batch driver: one heatmap PNG per hit-rate table
//!
//! Each identifier runs load -> trim -> render -> save on its own grid and
//! figure. The figure lives only inside `render_one`, so its buffer is freed
//! before the next file starts whether or not the save succeeded.

use crate::config::RenderConfig;
use crate::error::HeatmapError;
use crate::grid::HitRateGrid;
use crate::identifier::FileIdentifier;
use crate::render::{Figure, draw_heatmap, load_font};
use ab_glyph::FontRef;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rendered: Vec<PathBuf>,
    /// Only filled in keep-going mode
    pub failed: Vec<(String, HeatmapError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct HeatmapRenderer {
    config: RenderConfig,
    font: FontRef<'static>,
}

impl HeatmapRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, HeatmapError> {
        Ok(Self {
            config,
            font: load_font()?,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every configured file in order. Stops at the first failure
    /// unless `keep_going` is set.
    pub fn render_all(&self) -> Result<BatchReport, HeatmapError> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| HeatmapError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        info!(
            "Rendering {} hit-rate heatmaps from {} into {}",
            self.config.files.len(),
            self.config.input_dir.display(),
            self.config.output_dir.display()
        );

        let mut report = BatchReport::default();
        for identifier in &self.config.files {
            match self.render_one(identifier) {
                Ok(path) => report.rendered.push(path),
                Err(err) if self.config.keep_going => {
                    error!("Skipping {}: {}", identifier, err);
                    report.failed.push((identifier.clone(), err));
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "Rendered {} heatmaps, {} failed",
            report.rendered.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Render one table and return the path of the written PNG.
    pub fn render_one(&self, identifier: &str) -> Result<PathBuf, HeatmapError> {
        let id = FileIdentifier::parse(identifier)?;
        let input = self.config.input_path(identifier);
        let grid = HitRateGrid::load(&input)?;
        debug!("Loaded {} ({}x{})", input.display(), grid.rows(), grid.cols());
        let grid = grid.without_last_column()?;

        let output = self.config.output_path(&id.output_file_name());
        let title = id.title();
        {
            let mut figure = Figure::new(self.config.width, self.config.height, &self.font)?;
            draw_heatmap(&mut figure, &grid, &title)?;
            figure.save(&output)?;
        }

        match grid.stats() {
            Some(stats) => info!(
                "Saved {} [{}]: {}x{} min {:.3} max {:.3} mean {:.3}",
                output.display(),
                title,
                grid.rows(),
                grid.cols(),
                stats.min,
                stats.max,
                stats.mean
            ),
            None => info!("Saved {} [{}]", output.display(), title),
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const TABLE: &str = "0.60,0.55,0.50,\n0.70,0.65,0.60,\n0.80,0.75,0.70,\n";

    fn write_table(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn config_for(dir: &TempDir, files: &[&str]) -> RenderConfig {
        RenderConfig {
            files: files.iter().map(|f| f.to_string()).collect(),
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_render_one_writes_named_png() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "rogue_wizard_hit_rate.csv", TABLE);
        let renderer =
            HeatmapRenderer::new(config_for(&dir, &["rogue_wizard_hit_rate.csv"])).unwrap();

        let report = renderer.render_all().unwrap();
        assert!(report.is_success());
        let expected = dir.path().join("out").join("rogue_wizard_hit_rate.png");
        assert_eq!(report.rendered, vec![expected.clone()]);

        let img = image::open(&expected).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (1000, 800));
    }

    #[test]
    fn test_rerun_overwrites_output() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "NPC_cleric_hit_rate.csv", TABLE);
        let renderer =
            HeatmapRenderer::new(config_for(&dir, &["NPC_cleric_hit_rate.csv"])).unwrap();

        // render_one expects the output directory to exist
        fs::create_dir_all(dir.path().join("out")).unwrap();
        let first = renderer.render_one("NPC_cleric_hit_rate.csv").unwrap();
        let first_bytes = fs::read(&first).unwrap();
        let second = renderer.render_one("NPC_cleric_hit_rate.csv").unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), first_bytes);
    }

    #[test]
    fn test_missing_file_stops_batch() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "wizard_NPC_hit_rate.csv", TABLE);
        let renderer = HeatmapRenderer::new(config_for(
            &dir,
            &["rogue_NPC_hit_rate.csv", "wizard_NPC_hit_rate.csv"],
        ))
        .unwrap();

        let err = renderer.render_all().unwrap_err();
        assert!(matches!(err, HeatmapError::Load { .. }));
        let out = dir.path().join("out");
        assert!(!out.join("rogue_NPC_hit_rate.png").exists());
        assert!(!out.join("wizard_NPC_hit_rate.png").exists());
    }

    #[test]
    fn test_keep_going_renders_remaining_files() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "wizard_NPC_hit_rate.csv", TABLE);
        let mut config = config_for(
            &dir,
            &["rogue_NPC_hit_rate.csv", "bad name.csv", "wizard_NPC_hit_rate.csv"],
        );
        config.keep_going = true;
        let renderer = HeatmapRenderer::new(config).unwrap();

        let report = renderer.render_all().unwrap();
        assert!(!report.is_success());
        assert_eq!(report.rendered.len(), 1);
        assert!(report.rendered[0].ends_with("wizard_NPC_hit_rate.png"));
        assert_eq!(report.failed.len(), 2);
        assert!(matches!(report.failed[0].1, HeatmapError::Load { .. }));
        assert!(matches!(report.failed[1].1, HeatmapError::Parse { .. }));
    }

    #[test]
    fn test_single_column_table_is_shape_error() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "cleric_NPC_hit_rate.csv", "0.5\n0.6\n");
        let renderer =
            HeatmapRenderer::new(config_for(&dir, &["cleric_NPC_hit_rate.csv"])).unwrap();
        assert!(matches!(
            renderer.render_all(),
            Err(HeatmapError::Shape(_))
        ));
        assert!(!dir.path().join("out").join("cleric_NPC_hit_rate.png").exists());
    }

    #[test]
    fn test_save_failure_stops_batch() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "rogue_wizard_hit_rate.csv", TABLE);
        write_table(dir.path(), "wizard_NPC_hit_rate.csv", TABLE);
        // A directory where the first PNG should go makes the write fail
        let out = dir.path().join("out");
        fs::create_dir_all(out.join("rogue_wizard_hit_rate.png")).unwrap();
        let renderer = HeatmapRenderer::new(config_for(
            &dir,
            &["rogue_wizard_hit_rate.csv", "wizard_NPC_hit_rate.csv"],
        ))
        .unwrap();

        match renderer.render_all() {
            Err(HeatmapError::Save { path, .. }) => {
                assert_eq!(path, out.join("rogue_wizard_hit_rate.png"));
            }
            other => panic!("expected save error, got {other:?}"),
        }
        assert!(!out.join("wizard_NPC_hit_rate.png").exists());

        // The renderer is still usable once the path is free again
        fs::remove_dir(out.join("rogue_wizard_hit_rate.png")).unwrap();
        let path = renderer.render_one("rogue_wizard_hit_rate.csv").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        write_table(dir.path(), "rogue_wizard_hit_rate.csv", TABLE);
        fs::write(dir.path().join("out"), "not a directory").unwrap();
        let renderer =
            HeatmapRenderer::new(config_for(&dir, &["rogue_wizard_hit_rate.csv"])).unwrap();

        match renderer.render_all() {
            Err(HeatmapError::OutputDir { path, .. }) => assert_eq!(path, dir.path().join("out")),
            other => panic!("expected output dir error, got {other:?}"),
        }
    }

    #[test]
    fn test_first_row_is_on_top_of_saved_image() {
        let dir = TempDir::new().unwrap();
        // Row 0 is the minimum, last row the maximum
        write_table(dir.path(), "barbarian_NPC_hit_rate.csv", "0.0,0.0,\n1.0,1.0,\n");
        let renderer =
            HeatmapRenderer::new(config_for(&dir, &["barbarian_NPC_hit_rate.csv"])).unwrap();
        let report = renderer.render_all().unwrap();
        let path = &report.rendered[0];

        let img = image::open(path).unwrap().to_rgb8();
        let plot = crate::render::PlotArea::for_canvas(1000, 800).unwrap();
        let x = plot.left + plot.width / 2;
        let top = *img.get_pixel(x, plot.top + plot.height / 4);
        let bottom = *img.get_pixel(x, plot.top + plot.height * 3 / 4);
        assert_eq!(top, crate::render::coolwarm(0.0));
        assert_eq!(bottom, crate::render::coolwarm(1.0));
    }
}
