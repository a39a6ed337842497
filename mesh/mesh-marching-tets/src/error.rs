//! Error types for crossing detection.

use mesh_retess::RetessError;
use thiserror::Error;

/// Errors that can occur during crossing detection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    /// The iso value is NaN or infinite.
    #[error("Iso value must be finite, got {0}")]
    NonFiniteIsoValue(f64),

    /// A crossing could not be recorded.
    #[error("Failed to record crossing: {0}")]
    Crossing(#[from] RetessError),
}

/// Result type for crossing detection.
pub type DetectResult<T> = std::result::Result<T, DetectError>;
