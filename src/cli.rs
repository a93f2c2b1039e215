//! CLI argument parsing

use crate::scaling::{PropertyReader, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Property file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "chart_config.json";

#[derive(Parser, Debug)]
#[command(name = "worker_scaling_plot")]
#[command(version)]
#[command(
    about = "Render speedup, efficiency and total time vs. worker count to a PNG",
    long_about = None
)]
pub struct Cli {
    /// JSON object of chart properties (default: ./chart_config.json if present)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset file: columns {workers, total_time, speedup, efficiency} or {runs: [{workers, millis}]}
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output PNG path (overrides output.path)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Resolution in dots per inch (overrides figure.dpi)
    #[arg(long = "dpi", value_name = "DPI")]
    pub dpi: Option<f64>,

    /// Print the dataset as a text table before rendering
    #[arg(long = "table")]
    pub table: bool,

    /// Open the written file in the default image viewer
    #[arg(long = "show")]
    pub show: bool,
}

impl Cli {
    /// Merge the config file (explicit or default) with CLI overrides
    pub fn properties(&self) -> Result<PropertyReader> {
        self.properties_in(Path::new("."))
    }

    /// Same as `properties`, resolving the default config file against `dir`
    pub fn properties_in(&self, dir: &Path) -> Result<PropertyReader> {
        let mut props = match &self.config {
            Some(path) => PropertyReader::from_file(path)?,
            None => {
                let default_path = dir.join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    log::info!("Loaded configuration from {}", default_path.display());
                    PropertyReader::from_file(&default_path)?
                } else {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    PropertyReader::default()
                }
            }
        };

        if let Some(output) = &self.output {
            props.set("output.path", output.to_string_lossy());
        }
        if let Some(dpi) = self.dpi {
            props.set("figure.dpi", dpi.to_string());
        }

        Ok(props)
    }
}
