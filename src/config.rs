//! Chart configuration from properties
//!
//! Configuration is loaded from chart properties (defined in chart.json).
//! All default values come from chart.json - no hardcoded fallbacks in this code.

use crate::scaling::{ChartError, PropertyReader, Result};
use std::path::PathBuf;

/// Upper bound on rendered pixels (keeps the RGB buffer under ~300 MB)
const MAX_PIXELS: u64 = 100_000_000;

/// PNG encoder compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Fastest encoding, larger files
    Fast,
    #[default]
    Default,
    /// Slowest encoding, smallest files
    Best,
}

impl PngCompression {
    /// Parse from string value
    ///
    /// Validation happens in PropertyReader::get_enum()
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fast" => Self::Fast,
            "best" => Self::Best,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Figure width in inches
    pub width_in: f64,

    /// Figure height in inches
    pub height_in: f64,

    /// Dots per inch, used both for pixel size and for the PNG pHYs chunk
    pub dpi: f64,

    /// Where the PNG is written
    pub output_path: PathBuf,

    /// Categorical palette name (see palettes.json)
    pub palette: String,

    pub show_grid: bool,

    /// Draw value labels above every point
    pub annotate: bool,

    pub font_family: String,

    /// Tick, axis description and value label size in points
    pub font_size_pt: f64,

    pub title_size_pt: f64,

    pub line_width_pt: f64,

    /// Marker diameter in points
    pub marker_size_pt: f64,

    pub png_compression: PngCompression,
}

impl ChartConfig {
    /// Create config from chart properties
    pub fn from_properties(props: &PropertyReader) -> Self {
        // Physical size, validated against sane ranges
        let width_in = props.get_f64_in_range("figure.width", 1.0, 100.0);
        let height_in = props.get_f64_in_range("figure.height", 1.0, 100.0);
        let dpi = props.get_f64_in_range("figure.dpi", 36.0, 1200.0);

        let output_path = PathBuf::from(props.get_string("output.path"));

        let palette = props.get_string("palette");
        let show_grid = props.get_bool("grid");
        let annotate = props.get_bool("annotate");

        // Text
        let font_family = props.get_string("font.family");
        let font_size_pt = props.get_f64_in_range("font.size", 4.0, 72.0);
        let title_size_pt = props.get_f64_in_range("title.size", 4.0, 72.0);

        // Series styling
        let line_width_pt = props.get_f64_in_range("line.width", 0.1, 20.0);
        let marker_size_pt = props.get_f64_in_range("marker.size", 1.0, 40.0);

        let png_compression = PngCompression::parse(&props.get_enum("png.compression"));

        Self {
            width_in,
            height_in,
            dpi,
            output_path,
            palette,
            show_grid,
            annotate,
            font_family,
            font_size_pt,
            title_size_pt,
            line_width_pt,
            marker_size_pt,
            png_compression,
        }
    }

    /// Figure size in pixels: inches × dpi, rounded
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Convert a typographic size (1/72 inch) to pixels at the configured dpi
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// Reject configurations that cannot be rendered
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.pixel_size();
        if w == 0 || h == 0 {
            return Err(ChartError::Config(format!(
                "figure resolves to an empty image ({}×{} px)",
                w, h
            )));
        }
        if w as u64 * h as u64 > MAX_PIXELS {
            return Err(ChartError::Config(format!(
                "figure of {}×{} px exceeds the {} pixel limit; lower figure.dpi or the size",
                w, h, MAX_PIXELS
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ChartError::Config("output.path is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::default())
    }
}
