//! Hit-rate heatmap generator
//!
//! Renders each simulator hit-rate table to `{subject}_{target}_hit_rate.png`.
//!
//! Usage:
//!   cargo run                                  # Default: the 8 tables in the working directory
//!   cargo run -- --output-dir plots
//!   cargo run -- --config heatmaps.toml --keep-going
//!   RUST_LOG=debug cargo run

use anyhow::{Context, Result, bail};
use clap::Parser;
use hitrate_heatmap::{HeatmapRenderer, RenderConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Render hit-rate CSV tables as heatmap PNGs", long_about = None)]
struct Cli {
    /// TOML file overriding the default file list and layout
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the CSV tables
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory the PNGs are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Report a failed table and continue with the rest
    #[arg(long)]
    keep_going: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line flags applied on top.
    fn into_config(self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        config.keep_going |= self.keep_going;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config()?;
    let renderer = HeatmapRenderer::new(config).context("Failed to set up renderer")?;
    let report = renderer.render_all().context("Heatmap batch aborted")?;

    // Each failure was already logged by the renderer
    if !report.is_success() {
        bail!(
            "{} of {} tables failed",
            report.failed.len(),
            renderer.config().files.len()
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
