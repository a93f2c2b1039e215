//! Panel specifications
//!
//! A panel is one metric plotted against worker count: its points, tick
//! positions, value labels and axis ranges. Nothing here touches a drawing
//! backend, so layout decisions can be checked without rendering.

use crate::scaling::{Metric, ScalingDataset};
use std::ops::Range;

/// Fraction of the data span added on each side of an axis
const AXIS_MARGIN: f64 = 0.05;

/// A value label anchored above a data point
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: i64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub metric: Metric,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    points: Vec<(i64, f64)>,
    x_ticks: Vec<i64>,
}

impl PanelSpec {
    pub fn new(metric: Metric, dataset: &ScalingDataset) -> Self {
        let points: Vec<(i64, f64)> = dataset
            .workers()
            .iter()
            .zip(dataset.values(metric))
            .map(|(&w, &v)| (i64::from(w), v))
            .collect();

        let x_ticks = dataset.workers().iter().map(|&w| i64::from(w)).collect();

        Self {
            metric,
            title: format!("{} vs Workers", metric.name()),
            x_label: "Workers".to_string(),
            y_label: metric.y_label().to_string(),
            points,
            x_ticks,
        }
    }

    /// (workers, value) pairs, one per worker count
    pub fn points(&self) -> &[(i64, f64)] {
        &self.points
    }

    /// Tick positions on the x axis: exactly the worker counts
    pub fn x_ticks(&self) -> &[i64] {
        &self.x_ticks
    }

    /// One label per point, shifted up by the metric's offset
    pub fn annotations(&self) -> Vec<Annotation> {
        let offset = self.metric.label_offset();
        self.points
            .iter()
            .map(|&(x, y)| Annotation {
                x,
                y: y + offset,
                text: self.metric.format_value(y),
            })
            .collect()
    }

    /// Worker axis extent, padded outward to whole workers
    pub fn x_range(&self) -> Range<i64> {
        let range = padded_range(self.points.iter().map(|p| p.0 as f64));
        (range.start.floor() as i64)..(range.end.ceil() as i64)
    }

    /// Y extent of the data, extended to the label anchors when annotating
    pub fn y_range(&self, annotate: bool) -> Range<f64> {
        let offset = if annotate {
            self.metric.label_offset()
        } else {
            0.0
        };
        let anchors = self.points.iter().map(move |p| p.1 + offset);
        padded_range(self.points.iter().map(|p| p.1).chain(anchors))
    }
}

/// The three panels in figure order: speedup, efficiency, total time
pub fn figure_panels(dataset: &ScalingDataset) -> Vec<PanelSpec> {
    Metric::ALL
        .iter()
        .map(|&metric| PanelSpec::new(metric, dataset))
        .collect()
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }

    let span = hi - lo;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else if lo != 0.0 {
        lo.abs() * AXIS_MARGIN
    } else {
        0.5
    };
    (lo - pad)..(hi + pad)
}
