//! Synthetic curvilinear ocean basin
//!
//! Small stand-in for model output: a bowl-shaped bathymetry with a mid-basin
//! ridge, land (depth 0) along the western and eastern coasts and around an
//! island, and a grid whose longitudes shear with latitude so the coordinates
//! are genuinely 2D.

use crate::errors::{PcolorError, Result};
use ndarray::Array2;
use std::f64::consts::PI;

/// Cell depth over land, used as the no-data value
pub const LAND: f64 = 0.0;

const EARTH_RADIUS: f64 = 6.371e6;
const LON_SPAN: f64 = 60.0;
const LAT_SOUTH: f64 = -40.0;
const LAT_SPAN: f64 = 80.0;

/// Cell-centered basin fields, all `(nj, ni)`
#[derive(Debug, Clone)]
pub struct Basin {
    pub depth: Array2<f64>,
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
    pub area: Array2<f64>,
}

/// Build an `nj` by `ni` basin.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if either dimension is below 2, since
/// corners cannot be reconstructed from a single center.
pub fn synthetic_basin(ni: usize, nj: usize) -> Result<Basin> {
    if ni < 2 || nj < 2 {
        return Err(PcolorError::shape_mismatch("demo grid", &[2, 2], &[nj, ni]));
    }
    let u = |i: usize| (i as f64 + 0.5) / ni as f64;
    let v = |j: usize| (j as f64 + 0.5) / nj as f64;
    let dlon = LON_SPAN / ni as f64;
    let dlat = LAT_SPAN / nj as f64;

    let lat = Array2::from_shape_fn((nj, ni), |(j, _)| LAT_SOUTH + LAT_SPAN * v(j));
    let lon = Array2::from_shape_fn((nj, ni), |(j, i)| {
        LON_SPAN * u(i) + 2.0 * lat[[j, 0]].to_radians().sin()
    });
    let area = lat.mapv(|phi| {
        EARTH_RADIUS * EARTH_RADIUS * phi.to_radians().cos() * dlon.to_radians() * dlat.to_radians()
    });
    let depth = Array2::from_shape_fn((nj, ni), |(j, i)| {
        let (x, y) = (u(i), v(j));
        let coast = x < 0.08 || x > 0.92;
        let island = (x - 0.7).powi(2) + (y - 0.6).powi(2) < 0.004;
        if coast || island {
            return LAND;
        }
        let bowl = 4000.0 * ((PI * x).sin() * (PI * y).sin()).sqrt();
        let ridge = 1500.0 * (-((x - 0.5) / 0.05).powi(2)).exp();
        (bowl - ridge).max(10.0)
    });

    tracing::debug!(ni, nj, "built synthetic basin");
    Ok(Basin {
        depth,
        lon,
        lat,
        area,
    })
}
