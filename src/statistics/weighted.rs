//! Masked, area-weighted descriptive statistics of a 2D field

use super::parallel::{combine, reduce_rows, WeightedSums};
use crate::errors::{PcolorError, Result};
use crate::field::MaskedField;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Summary statistics of a field.
///
/// `mean`, `std` and `rms` are only defined when cell areas were supplied; without
/// them they are `None`, never zero or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub min: f64,
    pub max: f64,
    pub mean: Option<f64>,
    /// Area-weighted population standard deviation
    pub std: Option<f64>,
    /// Area-weighted root mean square
    pub rms: Option<f64>,
}

impl FieldStats {
    /// Whether the area-weighted moments were computed.
    pub fn has_moments(&self) -> bool {
        self.mean.is_some()
    }
}

/// Compute min/max over the unmasked cells and, when `area` is given, the
/// area-weighted mean, standard deviation and RMS.
///
/// Masked cells contribute no area: `w = area` where the field is valid and `0`
/// elsewhere, then with `A = Σw`:
///
/// - `mean = Σ(w·s) / A`
/// - `std  = sqrt(Σ(w·(s - mean)²) / A)`
/// - `rms  = sqrt(Σ(w·s²) / A)`
///
/// # Errors
///
/// - [`PcolorError::EmptyField`] if every cell is masked
/// - [`PcolorError::ShapeMismatch`] if `area` differs in shape from the field
/// - [`PcolorError::DegenerateWeights`] if the masked area sums to zero
pub fn stats(field: &MaskedField, area: Option<ArrayView2<'_, f64>>) -> Result<FieldStats> {
    let (min, max) = field
        .valid_values()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(PcolorError::EmptyField)?;

    let Some(area) = area else {
        return Ok(FieldStats {
            min,
            max,
            mean: None,
            std: None,
            rms: None,
        });
    };
    check_area_shape(field, area)?;

    tracing::debug!(sum_area = area.sum(), "weighted stats: area before masking");

    let values = field.values();
    let valid = field.validity();
    let (nj, ni) = field.dim();

    let sums = combine(&reduce_rows(nj, nj * ni, |j| {
        (0..ni).fold(WeightedSums::default(), |acc, i| {
            if valid[[j, i]] {
                acc.add(area[[j, i]], values[[j, i]])
            } else {
                acc
            }
        })
    }));

    let sum_area = sums.weight;
    tracing::debug!(sum_area, sum_weighted = sums.first, "weighted stats: after masking");
    if sum_area == 0.0 {
        return Err(PcolorError::DegenerateWeights { sum: sum_area });
    }

    let mean = sums.first / sum_area;
    let spread: f64 = reduce_rows(nj, nj * ni, |j| {
        (0..ni)
            .filter(|&i| valid[[j, i]])
            .map(|i| area[[j, i]] * (values[[j, i]] - mean).powi(2))
            .sum::<f64>()
    })
    .iter()
    .sum();

    let std = (spread / sum_area).sqrt();
    let rms = (sums.second / sum_area).sqrt();
    tracing::debug!(mean, std, rms, "weighted stats");

    Ok(FieldStats {
        min,
        max,
        mean: Some(mean),
        std: Some(std),
        rms: Some(rms),
    })
}

pub(crate) fn check_area_shape(field: &MaskedField, area: ArrayView2<'_, f64>) -> Result<()> {
    if field.shape() != area.shape() {
        return Err(PcolorError::shape_mismatch(
            "area weights",
            field.shape(),
            area.shape(),
        ));
    }
    Ok(())
}
