//! Figure rendering with plotters
//!
//! Draws a single row of panels into an in-memory RGB buffer. Encoding and
//! writing the image are separate steps (see `png_encode` and the pipeline),
//! so the bitmap backend never touches the filesystem.

use super::panel::PanelSpec;
use crate::config::ChartConfig;
use crate::scaling::palettes::palette_color;
use crate::scaling::{ChartError, Metric, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Raw 8-bit RGB pixels, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Pixel-space styling resolved from a ChartConfig
#[derive(Debug, Clone)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub font_px: f64,
    pub title_px: f64,
    pub line_px: u32,
    pub marker_radius_px: u32,
    pub show_grid: bool,
    pub annotate: bool,
    /// Colors in Metric::ALL order
    colors: [RGBColor; 3],
}

impl FigureStyle {
    /// Convert point sizes to pixels and resolve panel colors
    ///
    /// Fails if the configured palette does not exist.
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        let (width, height) = config.pixel_size();

        let mut colors = [BLACK; 3];
        for (slot, metric) in colors.iter_mut().zip(Metric::ALL) {
            let [r, g, b] = palette_color(&config.palette, metric.palette_slot())?;
            *slot = RGBColor(r, g, b);
        }

        Ok(Self {
            width,
            height,
            font_family: config.font_family.clone(),
            font_px: config.pt_to_px(config.font_size_pt),
            title_px: config.pt_to_px(config.title_size_pt),
            line_px: config.pt_to_px(config.line_width_pt).round().max(1.0) as u32,
            marker_radius_px: (config.pt_to_px(config.marker_size_pt) / 2.0)
                .round()
                .max(1.0) as u32,
            show_grid: config.show_grid,
            annotate: config.annotate,
            colors,
        })
    }

    pub fn color_for(&self, metric: Metric) -> RGBColor {
        let idx = Metric::ALL
            .iter()
            .position(|&m| m == metric)
            .unwrap_or(0);
        self.colors[idx]
    }

    fn margin_px(&self) -> u32 {
        self.font_px.round() as u32
    }

    fn x_label_area_px(&self) -> u32 {
        (self.font_px * 3.2).round() as u32
    }

    fn y_label_area_px(&self) -> u32 {
        (self.font_px * 4.5).round() as u32
    }
}

/// Check that the font family can be loaded by the text backend
///
/// Text drawing fails on hosts without system fonts; checking up front turns
/// that into a clear error instead of a failure halfway through a panel.
pub fn fonts_available(family: &str) -> bool {
    (family, 12.0).into_font().box_size("0.123").is_ok()
}

/// Render all panels side by side into an RGB frame
pub fn render_figure(panels: &[PanelSpec], style: &FigureStyle) -> Result<RgbFrame> {
    if panels.is_empty() {
        return Err(ChartError::Render("no panels to draw".to_string()));
    }

    let (width, height) = (style.width, style.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let areas = root.split_evenly((1, panels.len()));
        for (area, panel) in areas.iter().zip(panels) {
            draw_panel(area, panel, style)?;
        }

        root.present().map_err(ChartError::render)?;
    }

    Ok(RgbFrame {
        width,
        height,
        pixels,
    })
}

/// Draw one panel: caption, mesh, line with markers, value labels
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PanelSpec,
    style: &FigureStyle,
) -> Result<()> {
    let color = style.color_for(panel.metric);
    let font = style.font_family.as_str();

    let title_font = (font, style.title_px).into_font();
    let text_style = (font, style.font_px).into_font().color(&BLACK);

    let x_range = panel.x_range().with_key_points(panel.x_ticks().to_vec());
    let y_range = panel.y_range(style.annotate);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, title_font)
        .margin(style.margin_px())
        .x_label_area_size(style.x_label_area_px())
        .y_label_area_size(style.y_label_area_px())
        .build_cartesian_2d(x_range, y_range)
        .map_err(ChartError::render)?;

    let grid_color = BLACK.mix(0.15);

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .label_style(text_style.clone())
        .axis_desc_style(text_style.clone())
        .bold_line_style(grid_color)
        .light_line_style(TRANSPARENT);
    if !style.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(ChartError::render)?;

    chart
        .draw_series(LineSeries::new(
            panel.points().iter().copied(),
            color.stroke_width(style.line_px),
        ))
        .map_err(ChartError::render)?;

    chart
        .draw_series(
            panel
                .points()
                .iter()
                .map(|&p| Circle::new(p, style.marker_radius_px, color.filled())),
        )
        .map_err(ChartError::render)?;

    if style.annotate {
        let label_style = text_style.pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(
                panel
                    .annotations()
                    .into_iter()
                    .map(|a| Text::new(a.text, (a.x, a.y), label_style.clone())),
            )
            .map_err(ChartError::render)?;
    }

    Ok(())
}
