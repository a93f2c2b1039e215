//! Timing utilities
//!
//! Phase timings go to the `debug` log level, so they only show up with
//! `RUST_LOG=debug`.

use std::time::Instant;

/// Start a new timing checkpoint, returns the Instant
pub fn time_start(label: &str) -> Instant {
    log::debug!("TIMEPROF: {} ...", label);
    Instant::now()
}

/// Log elapsed time with delta from previous checkpoint
pub fn time_delta(label: &str, start: Instant, section_start: Instant) -> Instant {
    log::debug!(
        "TIMEPROF: {} [+{:.3}s, total: {:.3}s]",
        label,
        section_start.elapsed().as_secs_f64(),
        start.elapsed().as_secs_f64()
    );
    Instant::now()
}
