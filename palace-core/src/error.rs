//! Error types for the edges of the layout core.
//!
//! Layout itself is total; only decoding input and validating configuration
//! can fail.

pub type Result<T, E = PayloadError> = std::result::Result<T, E>;

/// Failure to turn an analysis response into nodes.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid analysis payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Analysis payload must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("Analysis service reported an error: {0}")]
    Backend(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rejected [`GalleryConfig`](crate::layout::GalleryConfig) values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidRadius { field: &'static str, value: f64 },

    #[error("{field} must be a finite range with start < end, got {start}..{end}")]
    InvalidRange { field: &'static str, start: f64, end: f64 },
}
