//! Cell-center to cell-corner coordinate conversion
//!
//! Quadrilateral (pcolormesh-style) rendering needs the coordinates of cell
//! *corners*, an `(nj+1, ni+1)` mesh around an `(nj, ni)` field. Model output
//! usually provides cell *centers* instead. This module reconstructs corners by
//! averaging neighbouring centers in the interior and reflecting the nearest
//! interior gap outward at the edges.
//!
//! All functions borrow their inputs and allocate fresh output arrays.

use crate::errors::{PcolorError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use serde::{Deserialize, Serialize};

/// A coordinate supplied by the caller, either shared along one axis or a full mesh
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinate {
    /// 1D coordinate; x varies along columns, y along rows
    Vector(Array1<f64>),
    /// 2D coordinate with one value per center or per corner
    Grid(Array2<f64>),
}

impl From<Array1<f64>> for Coordinate {
    fn from(v: Array1<f64>) -> Self {
        Coordinate::Vector(v)
    }
}

impl From<Array2<f64>> for Coordinate {
    fn from(g: Array2<f64>) -> Self {
        Coordinate::Grid(g)
    }
}

impl Coordinate {
    /// 2D coordinate from a row-major buffer, as read from a model file.
    ///
    /// # Errors
    ///
    /// Returns [`PcolorError::ArrayError`] if `data` does not hold `rows * cols` values.
    pub fn grid_from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Ok(Coordinate::Grid(Array2::from_shape_vec((rows, cols), data)?))
    }
}

impl From<Vec<f64>> for Coordinate {
    fn from(v: Vec<f64>) -> Self {
        Coordinate::Vector(Array1::from(v))
    }
}

/// Corner coordinates ready for quadrilateral rendering, both `(nj+1, ni+1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerCoords {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl CornerCoords {
    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// Which grid points a coordinate describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Staggering {
    Centers,
    Corners,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    X,
    Y,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::X => "x coordinate",
            Direction::Y => "y coordinate",
        }
    }
}

/// Expand a vector of centers to a vector of corners (length n → n+1).
///
/// Interior element `i` is `0.5 * (a[i-1] + a[i])`; the first and last elements
/// extrapolate by half of the adjacent gap, e.g. `[1, 2, 4]` → `[0.5, 1.5, 3, 5]`.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] for vectors shorter than 2, where the
/// edge gap is undefined.
pub fn expand(a: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    let n = a.len();
    if n < 2 {
        return Err(PcolorError::shape_mismatch("vector expansion", &[2], &[n]));
    }
    let mut b = Array1::zeros(n + 1);
    expand_lane(a, b.view_mut());
    Ok(b)
}

/// Expand a 2D array by one column, applying [`expand`] to every row.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if the array has fewer than 2 columns.
pub fn expand_i(a: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let (nj, ni) = a.dim();
    if ni < 2 {
        return Err(PcolorError::shape_mismatch("column expansion", &[nj, 2], &[nj, ni]));
    }
    let mut b = Array2::zeros((nj, ni + 1));
    for (src, dst) in a.rows().into_iter().zip(b.rows_mut()) {
        expand_lane(src, dst);
    }
    Ok(b)
}

/// Expand a 2D array by one row, applying [`expand`] to every column.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if the array has fewer than 2 rows.
pub fn expand_j(a: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let (nj, ni) = a.dim();
    if nj < 2 {
        return Err(PcolorError::shape_mismatch("row expansion", &[2, ni], &[nj, ni]));
    }
    let mut b = Array2::zeros((nj + 1, ni));
    for (src, dst) in a.columns().into_iter().zip(b.columns_mut()) {
        expand_lane(src, dst);
    }
    Ok(b)
}

// Caller guarantees src.len() >= 2 and dst.len() == src.len() + 1.
fn expand_lane(src: ArrayView1<'_, f64>, mut dst: ArrayViewMut1<'_, f64>) {
    let n = src.len();
    for k in 1..n {
        dst[k] = 0.5 * (src[k - 1] + src[k]);
    }
    dst[0] = src[0] + 0.5 * (src[0] - src[1]);
    dst[n] = src[n - 1] + 0.5 * (src[n - 1] - src[n - 2]);
}

/// Integer index corners `0, 1, ..., n` used when no coordinate is supplied.
pub fn index_coordinate(n: usize) -> Array1<f64> {
    Array1::from_iter((0..=n).map(|k| k as f64))
}

/// Build `(nj+1, ni+1)` corner coordinates for a field of shape `(nj, ni)`.
///
/// - A missing coordinate becomes index corners `0..=ni` (x) or `0..=nj` (y).
/// - A 1D coordinate is replicated along the orthogonal axis.
/// - Coordinates matching the field shape are centers and get expanded in both
///   directions; coordinates one larger in each direction are already corners.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] when a coordinate fits neither the
/// center nor the corner shape, when x and y disagree on which of the two they
/// describe, or when centers are too short to extrapolate.
pub fn expand_to_corners(
    field_shape: (usize, usize),
    x: Option<&Coordinate>,
    y: Option<&Coordinate>,
) -> Result<CornerCoords> {
    let x_stagger = x
        .map(|c| staggering(c, field_shape, Direction::X))
        .transpose()?;
    let y_stagger = y
        .map(|c| staggering(c, field_shape, Direction::Y))
        .transpose()?;

    if let (Some(sx), Some(sy)) = (x_stagger, y_stagger) {
        if sx != sy {
            return Err(PcolorError::shape_mismatch(
                "x/y coordinates",
                &coordinate_shape(x),
                &coordinate_shape(y),
            ));
        }
    }

    let x = corner_grid(x, x_stagger, field_shape, Direction::X)?;
    let y = corner_grid(y, y_stagger, field_shape, Direction::Y)?;
    tracing::debug!(shape = ?x.dim(), "built corner coordinates");
    Ok(CornerCoords { x, y })
}

/// Column-edge positions for a vertical section with `ni` columns.
///
/// A vector of length `ni` is taken as centers and expanded; length `ni+1` is
/// already edges and copied.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] for any other length.
pub fn section_edges(y: ArrayView1<'_, f64>, ni: usize) -> Result<Array1<f64>> {
    match y.len() {
        n if n == ni => expand(y),
        n if n == ni + 1 => Ok(y.to_owned()),
        n => Err(PcolorError::shape_mismatch("section coordinate", &[ni + 1], &[n])),
    }
}

fn coordinate_shape(c: Option<&Coordinate>) -> Vec<usize> {
    match c {
        Some(Coordinate::Vector(v)) => v.shape().to_vec(),
        Some(Coordinate::Grid(g)) => g.shape().to_vec(),
        None => Vec::new(),
    }
}

fn staggering(c: &Coordinate, (nj, ni): (usize, usize), dir: Direction) -> Result<Staggering> {
    match c {
        Coordinate::Vector(v) => {
            let n = match dir {
                Direction::X => ni,
                Direction::Y => nj,
            };
            match v.len() {
                len if len == n => Ok(Staggering::Centers),
                len if len == n + 1 => Ok(Staggering::Corners),
                len => Err(PcolorError::shape_mismatch(dir.label(), &[n + 1], &[len])),
            }
        }
        Coordinate::Grid(g) => match g.dim() {
            d if d == (nj, ni) => Ok(Staggering::Centers),
            d if d == (nj + 1, ni + 1) => Ok(Staggering::Corners),
            _ => Err(PcolorError::shape_mismatch(
                dir.label(),
                &[nj + 1, ni + 1],
                g.shape(),
            )),
        },
    }
}

fn corner_grid(
    c: Option<&Coordinate>,
    stagger: Option<Staggering>,
    (nj, ni): (usize, usize),
    dir: Direction,
) -> Result<Array2<f64>> {
    let (c, stagger) = match (c, stagger) {
        (Some(c), Some(s)) => (c, s),
        _ => {
            return Ok(match dir {
                Direction::X => broadcast_x(index_coordinate(ni).view(), nj + 1),
                Direction::Y => broadcast_y(index_coordinate(nj).view(), ni + 1),
            })
        }
    };

    let (rows, cols) = match stagger {
        Staggering::Centers => (nj, ni),
        Staggering::Corners => (nj + 1, ni + 1),
    };
    let grid = match c {
        Coordinate::Vector(v) => match dir {
            Direction::X => broadcast_x(v.view(), rows),
            Direction::Y => broadcast_y(v.view(), cols),
        },
        Coordinate::Grid(g) => g.to_owned(),
    };

    match stagger {
        Staggering::Centers => expand_j(expand_i(grid.view())?.view()),
        Staggering::Corners => Ok(grid),
    }
}

/// Replicate a row vector over `rows` rows.
fn broadcast_x(v: ArrayView1<'_, f64>, rows: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, v.len()), |(_, i)| v[i])
}

/// Replicate a column vector over `cols` columns.
fn broadcast_y(v: ArrayView1<'_, f64>, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((v.len(), cols), |(j, _)| v[j])
}
