use std::time::Instant;

/// Progress logger for one figure generation run
///
/// Writes numbered phase messages (`[2/3] Rendering ...`) through the `log`
/// facade, tagged with the run label and elapsed time.
pub struct RunLogger {
    label: String,
    total_steps: usize,
    start: Instant,
}

impl RunLogger {
    pub fn new(label: impl Into<String>, total_steps: usize) -> Self {
        RunLogger {
            label: label.into(),
            total_steps,
            start: Instant::now(),
        }
    }

    /// Log a free-form message for this run
    pub fn log(&self, message: impl AsRef<str>) {
        log::info!("[{}] {}", self.label, message.as_ref());
    }

    /// Log the start of a numbered phase (1-based)
    pub fn step(&self, index: usize, message: impl AsRef<str>) {
        log::info!("{}", self.step_line(index, message.as_ref()));
    }

    /// Log a progress percentage with a message
    pub fn progress(&self, percent: f64, message: impl AsRef<str>) {
        log::debug!(
            "[{}] {:>5.1}% {} (@{:.3}s)",
            self.label,
            percent.clamp(0.0, 100.0),
            message.as_ref(),
            self.elapsed_secs()
        );
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn step_line(&self, index: usize, message: &str) -> String {
        format!(
            "[{}/{}] {}",
            index.min(self.total_steps),
            self.total_steps,
            message
        )
    }
}
