use thiserror::Error;

/// Errors that can occur while loading data or producing the figure
#[derive(Debug, Error)]
pub enum ChartError {
    /// Filesystem error (reading inputs, writing the PNG)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a dataset or config file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PNG encoder failure
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    /// Dataset violates a structural invariant (lengths, ordering, values)
    #[error("Invalid dataset: {0}")]
    Dataset(String),

    /// Configuration error (unknown palette, impossible dimensions, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing backend error
    #[error("Render error: {0}")]
    Render(String),

    /// External viewer could not be launched
    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl ChartError {
    /// Wrap any displayable drawing error (plotters errors are generic over the backend)
    pub fn render(err: impl std::fmt::Display) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Type alias for Results using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
