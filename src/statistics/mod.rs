//! Area-weighted statistics of masked 2D fields
//!
//! # Organization
//!
//! - [`weighted`]: min, max, mean, standard deviation and RMS
//! - [`correlation`]: Pearson correlation between two fields
//! - [`section`]: cell weights for vertical sections
//! - [`parallel`]: deterministic row-parallel reductions used by the above

pub mod correlation;
pub mod parallel;
pub mod section;
pub mod weighted;

pub use correlation::{correlation, field_correlation};
pub use section::section_weights;
pub use weighted::{stats, FieldStats};
