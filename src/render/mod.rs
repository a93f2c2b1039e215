//! Plotting integration
//!
//! - `panel`: backend-independent panel layout (points, ticks, labels, ranges)
//! - `figure`: drawing panels with plotters into an RGB frame
//! - `png_encode`: PNG output with dpi metadata
//! - `viewer`: optional display of the written file

pub mod figure;
pub mod panel;
pub mod png_encode;
pub mod viewer;

pub use figure::{fonts_available, render_figure, FigureStyle, RgbFrame};
pub use panel::{figure_panels, Annotation, PanelSpec};
pub use png_encode::encode_png;
