//! Centralized error handling for RuPcolor
//!
//! Every error here is raised at the point of detection and returned to the caller
//! unchanged. None of them are retried inside the crate: they all describe arrays
//! or configuration that the caller has to fix.
//!
//! An undefined correlation (zero variance in either input) is *not*
//! an error; see [`correlation`](crate::statistics::correlation()).

use thiserror::Error;

/// Main error type for RuPcolor operations
#[derive(Debug, Error)]
pub enum PcolorError {
    /// Two arrays that must agree in shape do not
    #[error("Shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Ambiguous or insufficient bin/limit configuration
    #[error("Invalid level specification: {0}")]
    InvalidLevelSpec(String),

    /// Total area weight is zero so weighted moments are undefined
    #[error("Degenerate weights: total area after masking is {sum}")]
    DegenerateWeights { sum: f64 },

    /// Every cell of the field is masked
    #[error("Field has no valid (unmasked) values")]
    EmptyField,

    /// Colormap name not known to the built-in table
    #[error("Unknown colormap '{name}'")]
    UnknownColormap { name: String },

    /// Array construction from raw parts failed
    #[error("Array error: {0}")]
    ArrayError(#[from] ndarray::ShapeError),

    /// Thread pool configuration error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

impl PcolorError {
    /// Shorthand for a [`PcolorError::ShapeMismatch`] built from two shape slices.
    pub(crate) fn shape_mismatch(context: &str, expected: &[usize], found: &[usize]) -> Self {
        Self::ShapeMismatch {
            context: context.to_string(),
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }
}

/// Result type alias for RuPcolor operations
pub type Result<T> = std::result::Result<T, PcolorError>;
