//! Worker scaling dataset
//!
//! A dataset is four parallel columns indexed by worker count:
//! total time, speedup and efficiency. It is either the built-in benchmark
//! table, a columnar JSON file, or derived from raw timing runs.

use super::error::{ChartError, Result};
use serde::Deserialize;
use std::path::Path;

/// Worker counts of the built-in benchmark
const BUILTIN_WORKERS: [u32; 6] = [6, 12, 18, 24, 48, 72];
/// Total time in seconds
const BUILTIN_TOTAL_TIME: [f64; 6] = [0.290, 0.293, 0.304, 0.320, 0.362, 0.388];
const BUILTIN_SPEEDUP: [f64; 6] = [1.00, 0.99, 0.95, 0.91, 0.80, 0.75];
/// Efficiency in percent
const BUILTIN_EFFICIENCY: [f64; 6] = [100.0, 49.4, 31.7, 22.8, 10.0, 6.2];

/// A single raw benchmark measurement
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TimingRow {
    pub workers: u32,
    /// Wall-clock time of the run in milliseconds
    pub millis: f64,
}

/// The metrics plotted against worker count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Speedup,
    Efficiency,
    TotalTime,
}

impl Metric {
    /// Panel order in the figure
    pub const ALL: [Metric; 3] = [Metric::Speedup, Metric::Efficiency, Metric::TotalTime];

    /// Display name used in panel titles
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Speedup => "Speedup",
            Metric::Efficiency => "Eficiencia",
            Metric::TotalTime => "Tiempo Total",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Metric::Speedup => "Speedup",
            Metric::Efficiency => "Eficiencia (%)",
            Metric::TotalTime => "Tiempo Total (s)",
        }
    }

    /// Decimal places used when labelling values
    pub fn precision(&self) -> usize {
        match self {
            Metric::Speedup => 2,
            Metric::Efficiency => 1,
            Metric::TotalTime => 3,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Metric::Efficiency => "%",
            _ => "",
        }
    }

    /// Vertical distance (data units) between a point and its value label
    pub fn label_offset(&self) -> f64 {
        match self {
            Metric::Speedup => 0.02,
            Metric::Efficiency => 2.0,
            Metric::TotalTime => 0.005,
        }
    }

    /// Index into the categorical palette (tab10: blue, green, red)
    pub fn palette_slot(&self) -> usize {
        match self {
            Metric::Speedup => 0,
            Metric::Efficiency => 2,
            Metric::TotalTime => 3,
        }
    }

    /// Format a value the way it is printed on the chart
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}{}", self.precision(), value, self.suffix())
    }
}

/// Parallel columns of a worker scaling benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingDataset {
    workers: Vec<u32>,
    total_time: Vec<f64>,
    speedup: Vec<f64>,
    efficiency: Vec<f64>,
}

/// On-disk dataset shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Columns {
        workers: Vec<u32>,
        total_time: Vec<f64>,
        speedup: Vec<f64>,
        efficiency: Vec<f64>,
    },
    Timings {
        runs: Vec<TimingRow>,
    },
}

impl ScalingDataset {
    /// Build a dataset, validating that all columns line up
    pub fn new(
        workers: Vec<u32>,
        total_time: Vec<f64>,
        speedup: Vec<f64>,
        efficiency: Vec<f64>,
    ) -> Result<Self> {
        let n = workers.len();
        if n == 0 {
            return Err(ChartError::Dataset("no worker counts".to_string()));
        }

        for (name, len) in [
            ("total_time", total_time.len()),
            ("speedup", speedup.len()),
            ("efficiency", efficiency.len()),
        ] {
            if len != n {
                return Err(ChartError::Dataset(format!(
                    "column '{}' has {} values, expected {} (one per worker count)",
                    name, len, n
                )));
            }
        }

        if let Some(pos) = workers.iter().position(|&w| w == 0) {
            return Err(ChartError::Dataset(format!(
                "worker count at row {} is zero",
                pos
            )));
        }
        if let Some(pos) = workers.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ChartError::Dataset(format!(
                "worker counts must be strictly increasing ({} then {} at row {})",
                workers[pos],
                workers[pos + 1],
                pos + 1
            )));
        }

        for (name, column) in [
            ("total_time", &total_time),
            ("speedup", &speedup),
            ("efficiency", &efficiency),
        ] {
            if let Some(pos) = column.iter().position(|v| !v.is_finite()) {
                return Err(ChartError::Dataset(format!(
                    "column '{}' has a non-finite value at row {}",
                    name, pos
                )));
            }
        }

        Ok(Self {
            workers,
            total_time,
            speedup,
            efficiency,
        })
    }

    /// The benchmark table measured on the similarity engine's worker pool
    pub fn builtin() -> Self {
        Self {
            workers: BUILTIN_WORKERS.to_vec(),
            total_time: BUILTIN_TOTAL_TIME.to_vec(),
            speedup: BUILTIN_SPEEDUP.to_vec(),
            efficiency: BUILTIN_EFFICIENCY.to_vec(),
        }
    }

    /// Derive speedup and efficiency from raw timings, first row is the baseline
    ///
    /// Zero measurements are clamped to 1 ms so speedup stays finite.
    pub fn from_timings(runs: &[TimingRow]) -> Result<Self> {
        let base = runs
            .first()
            .ok_or_else(|| ChartError::Dataset("no timing runs".to_string()))?;
        let base_millis = clamp_millis(base.millis)?;
        let base_workers = base.workers.max(1) as f64;

        let mut workers = Vec::with_capacity(runs.len());
        let mut total_time = Vec::with_capacity(runs.len());
        let mut speedup = Vec::with_capacity(runs.len());
        let mut efficiency = Vec::with_capacity(runs.len());

        for run in runs {
            let millis = clamp_millis(run.millis)?;
            let sp = base_millis / millis;
            let scale = run.workers as f64 / base_workers;

            workers.push(run.workers);
            total_time.push(millis / 1000.0);
            speedup.push(sp);
            efficiency.push(if scale > 0.0 { sp / scale * 100.0 } else { 0.0 });
        }

        Self::new(workers, total_time, speedup, efficiency)
    }

    /// Parse either the columnar or the timing-runs JSON shape
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<DatasetFile>(json)? {
            DatasetFile::Columns {
                workers,
                total_time,
                speedup,
                efficiency,
            } => Self::new(workers, total_time, speedup, efficiency),
            DatasetFile::Timings { runs } => Self::from_timings(&runs),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn workers(&self) -> &[u32] {
        &self.workers
    }

    pub fn total_time(&self) -> &[f64] {
        &self.total_time
    }

    pub fn speedup(&self) -> &[f64] {
        &self.speedup
    }

    pub fn efficiency(&self) -> &[f64] {
        &self.efficiency
    }

    /// Column for a metric
    pub fn values(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Speedup => &self.speedup,
            Metric::Efficiency => &self.efficiency,
            Metric::TotalTime => &self.total_time,
        }
    }
}

fn clamp_millis(millis: f64) -> Result<f64> {
    if !millis.is_finite() || millis < 0.0 {
        return Err(ChartError::Dataset(format!(
            "invalid timing measurement: {} ms",
            millis
        )));
    }
    Ok(millis.max(1.0))
}
