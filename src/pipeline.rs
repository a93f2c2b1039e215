//! Shared figure generation pipeline
//!
//! The pipeline:
//! 1. Builds one panel spec per metric from the dataset
//! 2. Renders the panels side by side with plotters
//! 3. Encodes the frame as PNG with dpi metadata
//!
//! Writing the file is a separate step (`save_figure`) so callers decide
//! where the bytes go.

use crate::config::ChartConfig;
use crate::profiling;
use crate::render::{encode_png, figure_panels, fonts_available, render_figure};
use crate::render::{FigureStyle, PanelSpec};
use crate::scaling::{ChartError, Result, RunLogger, ScalingDataset};
use std::path::{Path, PathBuf};

/// A rendered figure ready to be written
#[derive(Debug, Clone)]
pub struct FigureResult {
    pub png_buffer: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
    pub panels: Vec<PanelSpec>,
}

/// Generate the speedup / efficiency / total time figure
pub fn generate_figure(dataset: &ScalingDataset, config: &ChartConfig) -> Result<FigureResult> {
    let logger = RunLogger::new("figure", 3);
    let t0 = profiling::time_start("generate_figure");

    config.validate()?;
    print_config_info(config);

    // Resolve palette and pixel sizes before doing any drawing
    let style = FigureStyle::from_config(config)?;
    if !fonts_available(&style.font_family) {
        return Err(ChartError::Render(format!(
            "no usable font for family '{}'",
            style.font_family
        )));
    }

    logger.step(1, format!("Building panels for {} worker counts", dataset.len()));
    let panels = figure_panels(dataset);
    for panel in &panels {
        log::debug!(
            "  {}: {} points, x ticks {:?}",
            panel.title,
            panel.points().len(),
            panel.x_ticks()
        );
    }
    logger.progress(10.0, "panels built");

    logger.step(
        2,
        format!(
            "Rendering {} panels ({}×{} px at {} dpi)",
            panels.len(),
            style.width,
            style.height,
            config.dpi
        ),
    );
    let t1 = std::time::Instant::now();
    let frame = render_figure(&panels, &style)?;
    let t2 = profiling::time_delta("After render_figure()", t0, t1);
    logger.progress(80.0, "panels drawn");

    logger.step(3, format!("Encoding PNG ({:?} compression)", config.png_compression));
    let png_buffer = encode_png(&frame, config.dpi, config.png_compression)?;
    let _ = profiling::time_delta("After encode_png()", t0, t2);
    logger.progress(100.0, "encoded");

    logger.log(format!(
        "✓ Figure generated ({} bytes) in {:.3}s",
        png_buffer.len(),
        logger.elapsed_secs()
    ));

    Ok(FigureResult {
        png_buffer,
        width: frame.width,
        height: frame.height,
        dpi: config.dpi,
        panels,
    })
}

/// Write the PNG to `path`, creating missing parent directories
///
/// Returns the path written.
pub fn save_figure(result: &FigureResult, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, &result.png_buffer)?;
    log::debug!(
        "Saved {} ({} bytes, {}×{} px)",
        path.display(),
        result.png_buffer.len(),
        result.width,
        result.height
    );
    Ok(path.to_path_buf())
}

fn print_config_info(config: &ChartConfig) {
    log::debug!("Configuration:");
    log::debug!(
        "  Figure: {} × {} in at {} dpi",
        config.width_in,
        config.height_in,
        config.dpi
    );
    log::debug!("  Palette: {}", config.palette);
    log::debug!(
        "  Font: {} {}pt (titles {}pt)",
        config.font_family,
        config.font_size_pt,
        config.title_size_pt
    );
    log::debug!(
        "  Grid: {}, annotate: {}",
        config.show_grid,
        config.annotate
    );
    log::debug!("  Output: {}", config.output_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::png_encode::tests::png_header;
    use crate::render::png_encode::pixels_per_metre;
    use crate::scaling::PropertyReader;

    fn test_config(dpi: &str) -> ChartConfig {
        ChartConfig::from_properties(&PropertyReader::new([("figure.dpi", dpi)]))
    }

    fn fonts_or_skip(config: &ChartConfig) -> bool {
        if fonts_available(&config.font_family) {
            true
        } else {
            eprintln!("skipping: no usable font for '{}'", config.font_family);
            false
        }
    }

    #[test]
    fn test_unknown_palette_fails_before_rendering() {
        let config = ChartConfig::from_properties(&PropertyReader::new([("palette", "missing")]));
        let err = generate_figure(&ScalingDataset::builtin(), &config).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }

    #[test]
    fn test_generate_figure_dimensions_and_dpi() {
        let config = test_config("50");
        if !fonts_or_skip(&config) {
            return;
        }

        let dataset = ScalingDataset::builtin();
        let result = generate_figure(&dataset, &config).unwrap();

        assert_eq!((result.width, result.height), (900, 250));
        assert_eq!(result.panels.len(), 3);
        for panel in &result.panels {
            assert_eq!(panel.points().len(), dataset.workers().len());
        }

        let (w, h, dims) = png_header(&result.png_buffer);
        assert_eq!((w, h), (900, 250));
        let dims = dims.expect("pHYs chunk missing");
        assert_eq!(dims.xppu, pixels_per_metre(50.0));
        assert_eq!(dims.yppu, pixels_per_metre(50.0));
    }

    #[test]
    fn test_generate_figure_is_deterministic() {
        let config = test_config("40");
        if !fonts_or_skip(&config) {
            return;
        }

        let dataset = ScalingDataset::builtin();
        let a = generate_figure(&dataset, &config).unwrap();
        let b = generate_figure(&dataset, &config).unwrap();
        assert_eq!(a.png_buffer, b.png_buffer);
    }

    #[test]
    fn test_default_figure_size() {
        // Full-size render: 18 × 5 in at 300 dpi
        let config = ChartConfig::default();
        if !fonts_or_skip(&config) {
            return;
        }

        let result = generate_figure(&ScalingDataset::builtin(), &config).unwrap();
        let (w, h, dims) = png_header(&result.png_buffer);
        assert_eq!((w, h), (5400, 1500));
        assert_eq!(dims.map(|d| d.xppu), Some(11811));
    }

    #[test]
    fn test_save_figure_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("analisis_workers.png");

        let result = FigureResult {
            png_buffer: vec![0x89, b'P', b'N', b'G'],
            width: 1,
            height: 1,
            dpi: 300.0,
            panels: Vec::new(),
        };
        let written = save_figure(&result, &path).unwrap();

        assert_eq!(written, path);
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), result.png_buffer);
    }

    #[test]
    fn test_save_generated_figure() {
        let config = test_config("36");
        if !fonts_or_skip(&config) {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analisis_workers.png");
        let result = generate_figure(&ScalingDataset::builtin(), &config).unwrap();
        save_figure(&result, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let (w, h, _) = png_header(&bytes);
        assert_eq!((w, h), (648, 180));
    }
}
