//! Plain-text summary of a scaling dataset
//!
//! Prints the same numbers the chart shows, with the same precisions, plus
//! the worker count that gave the lowest total time.

use super::dataset::{Metric, ScalingDataset};

/// Fixed-width table: one row per worker count
pub fn format_table(dataset: &ScalingDataset) -> String {
    let mut out = format_row("workers", "time_s", "speedup", "efficiency");

    for (i, workers) in dataset.workers().iter().enumerate() {
        out.push_str(&format_row(
            &workers.to_string(),
            &Metric::TotalTime.format_value(dataset.total_time()[i]),
            &Metric::Speedup.format_value(dataset.speedup()[i]),
            &Metric::Efficiency.format_value(dataset.efficiency()[i]),
        ));
    }
    out
}

fn format_row(workers: &str, time: &str, speedup: &str, efficiency: &str) -> String {
    format!("{:>8}  {:>10}  {:>8}  {:>10}\n", workers, time, speedup, efficiency)
}

/// Worker count with the lowest total time (first one wins on ties)
pub fn best_workers(dataset: &ScalingDataset) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;
    for (&workers, &time) in dataset.workers().iter().zip(dataset.total_time()) {
        match best {
            Some((_, best_time)) if time >= best_time => {}
            _ => best = Some((workers, time)),
        }
    }
    best.map(|(workers, _)| workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_builtin() {
        let table = format_table(&ScalingDataset::builtin());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 7); // header + 6 rows
        assert!(lines[0].contains("workers"));
        assert_eq!(lines[1], "       6       0.290      1.00      100.0%");
        assert!(lines[6].contains("72"));
        assert!(lines[6].contains("0.388"));
        assert!(lines[6].contains("6.2%"));
        assert!(table.ends_with('\n'));
        assert_eq!(lines[0], " workers      time_s   speedup  efficiency");
    }

    #[test]
    fn test_best_workers() {
        assert_eq!(best_workers(&ScalingDataset::builtin()), Some(6));

        let ds = ScalingDataset::new(
            vec![1, 2, 4, 8],
            vec![1.0, 0.6, 0.5, 0.5],
            vec![1.0, 1.67, 2.0, 2.0],
            vec![100.0, 83.3, 50.0, 25.0],
        )
        .unwrap();
        assert_eq!(best_workers(&ds), Some(4));
    }
}
