//! Error types for qcolor.

use thiserror::Error;

/// Unified error type for all qcolor operations.
///
/// Parameter problems are reported before any sampling work starts. An
/// infeasible coloring is never an error; see [`crate::Coloring::violations`].
#[derive(Error, Debug)]
pub enum QColorError {
    /// Invalid color count, read count, penalty weight or mismatched sizes
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The sampling backend failed or produced no samples
    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    /// Malformed graph input (files, generator arguments)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors (graph files, reports)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl QColorError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        QColorError::InvalidParameter(message.into())
    }

    /// Creates a solver unavailable error.
    pub fn solver_unavailable(message: impl Into<String>) -> Self {
        QColorError::SolverUnavailable(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        QColorError::ValidationError(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        QColorError::ConfigError(message.into())
    }

    /// Checks if this error may go away when the same call is repeated.
    ///
    /// Only backend failures qualify. qcolor itself never retries; the
    /// decision belongs to whoever integrates the backend.
    pub fn is_retriable(&self) -> bool {
        matches!(self, QColorError::SolverUnavailable(_))
    }

    /// Returns a user-friendly error message with actionable guidance.
    pub fn user_message(&self) -> String {
        match self {
            QColorError::InvalidParameter(msg) => {
                format!(
                    "Invalid parameter: {}\n\
                     → Color count and read count must be at least 1.\n\
                     → Penalty coefficients must be positive and finite.",
                    msg
                )
            }
            QColorError::SolverUnavailable(msg) => {
                format!(
                    "Solver unavailable: {}\n\
                     → Check the sampler configuration (sweeps, beta range).\n\
                     → The exact sampler only supports small models.",
                    msg
                )
            }
            QColorError::ValidationError(msg) => {
                format!(
                    "Validation error: {}\n\
                     → Verify the graph file format (DIMACS 'p edge N M' / 'e U V', or 'u v' edge lists).",
                    msg
                )
            }
            QColorError::ConfigError(msg) => {
                format!(
                    "Configuration error: {}\n\
                     → Review your configuration file and ensure all values are within valid ranges.",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for qcolor operations.
pub type Result<T> = std::result::Result<T, QColorError>;
