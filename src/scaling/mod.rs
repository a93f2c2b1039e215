//! Worker scaling domain module
//!
//! Structure:
//! - `dataset.rs`: the benchmark columns and how they are loaded or derived
//! - `properties.rs`: property registry (chart.json) and typed reader
//! - `palettes.rs`: embedded color palettes
//! - `logger.rs`: run progress logging
//! - `report.rs`: text summary of a dataset
//! - `error.rs`: Error types

pub mod dataset;
pub mod error;
pub mod logger;
pub mod palettes;
pub mod properties;
pub mod report;

// Re-exports for convenience
pub use dataset::{Metric, ScalingDataset, TimingRow};
pub use error::{ChartError, Result};
pub use logger::RunLogger;
pub use properties::PropertyReader;
