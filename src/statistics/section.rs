//! Cell weights for vertical (y-z) sections

use crate::errors::{PcolorError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Weights for statistics on a section with `nk` layers and `ni` columns.
///
/// `y_edges` (length `ni+1`) are column edge positions and `z` (shape
/// `(nk+1, ni)`) the interface elevations of each column, top first. The weight of
/// cell `(k, i)` is its width times its thickness:
/// `(y[i+1] - y[i]) * (z[k, i] - z[k+1, i])`.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if `y_edges` is not one longer than the
/// number of columns in `z`, or `z` has no rows.
pub fn section_weights(y_edges: ArrayView1<'_, f64>, z: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let (nz, ni) = z.dim();
    if y_edges.len() != ni + 1 {
        return Err(PcolorError::shape_mismatch(
            "section column edges",
            &[ni + 1],
            &[y_edges.len()],
        ));
    }
    if nz == 0 {
        return Err(PcolorError::shape_mismatch("section interfaces", &[1, ni], &[0, ni]));
    }
    Ok(Array2::from_shape_fn((nz - 1, ni), |(k, i)| {
        (y_edges[i + 1] - y_edges[i]) * (z[[k, i]] - z[[k + 1, i]])
    }))
}
