//! Perimeter-only extents for axis limits
//!
//! Axis limits for a whole-domain plot come from the physical mesh perimeter.
//! Interior corner values on curvilinear grids (tripolar folds, land-filled
//! points, singular values near a pole) must not stretch the axes.

use crate::errors::{PcolorError, Result};
use ndarray::{s, ArrayView2};

/// Minimum and maximum of `a` taken over its four edges only.
///
/// The edges are visited as the top row, the right column below it, the bottom
/// row left of the right column and the left column strictly between the top
/// and bottom rows, so every perimeter cell is read once.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] for an empty array.
pub fn boundary_minmax(a: ArrayView2<'_, f64>) -> Result<(f64, f64)> {
    let (nj, ni) = a.dim();
    if nj == 0 || ni == 0 {
        return Err(PcolorError::shape_mismatch("boundary extent", &[1, 1], &[nj, ni]));
    }

    let edges = [
        a.slice(s![0, ..]),
        a.slice(s![1.., ni - 1]),
        a.slice(s![nj - 1, ..ni - 1]),
        // Empty for arrays with fewer than three rows.
        a.slice(s![1..nj.saturating_sub(1).max(1), 0]),
    ];

    let (lo, hi) = edges
        .iter()
        .flat_map(|edge| edge.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    Ok((lo, hi))
}

/// Global minimum and maximum of a 1D array, used for axes whose coordinate is
/// a plain vector (section column edges).
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] for an empty slice.
pub fn vector_minmax(v: &[f64]) -> Result<(f64, f64)> {
    if v.is_empty() {
        return Err(PcolorError::shape_mismatch("vector extent", &[1], &[0]));
    }
    Ok(v.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
        (lo.min(x), hi.max(x))
    }))
}
