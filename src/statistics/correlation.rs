//! Area-weighted Pearson correlation between two fields

use super::parallel::reduce_rows;
use super::weighted::{check_area_shape, stats};
use crate::errors::{PcolorError, Result};
use crate::field::MaskedField;
use ndarray::ArrayView2;

#[derive(Debug, Clone, Copy, Default)]
struct CrossSums {
    weight: f64,
    var1: f64,
    var2: f64,
    cov: f64,
}

/// Area-weighted correlation coefficient of two fields that already have their
/// own weighted means subtracted.
///
/// The weight is `area` with cells masked in `s1` zeroed. Cells masked only in
/// `s2` keep their area in the normalization but add nothing to the sums that
/// involve `s2`.
///
/// A field with zero weighted variance has no defined correlation. That case
/// returns `f64::NAN`, the one place in the crate where NaN is a meaningful
/// result rather than a missing value; it is not an error.
///
/// # Errors
///
/// - [`PcolorError::ShapeMismatch`] if the fields or `area` differ in shape
/// - [`PcolorError::DegenerateWeights`] if the masked area sums to zero
pub fn correlation(
    s1: &MaskedField,
    s2: &MaskedField,
    area: ArrayView2<'_, f64>,
) -> Result<f64> {
    if s1.shape() != s2.shape() {
        return Err(PcolorError::shape_mismatch(
            "correlation fields",
            s1.shape(),
            s2.shape(),
        ));
    }
    check_area_shape(s1, area)?;

    let (v1, ok1) = (s1.values(), s1.validity());
    let (v2, ok2) = (s2.values(), s2.validity());
    let (nj, ni) = s1.dim();

    let sums = reduce_rows(nj, nj * ni, |j| {
        let mut acc = CrossSums::default();
        for i in 0..ni {
            if !ok1[[j, i]] {
                continue;
            }
            let w = area[[j, i]];
            let a = v1[[j, i]];
            acc.weight += w;
            acc.var1 += w * a * a;
            if ok2[[j, i]] {
                let b = v2[[j, i]];
                acc.var2 += w * b * b;
                acc.cov += w * a * b;
            }
        }
        acc
    })
    .into_iter()
    .fold(CrossSums::default(), |acc, row| CrossSums {
        weight: acc.weight + row.weight,
        var1: acc.var1 + row.var1,
        var2: acc.var2 + row.var2,
        cov: acc.cov + row.cov,
    });

    if sums.weight == 0.0 {
        return Err(PcolorError::DegenerateWeights { sum: sums.weight });
    }
    let var1 = sums.var1 / sums.weight;
    let var2 = sums.var2 / sums.weight;
    if var1 == 0.0 || var2 == 0.0 {
        tracing::debug!(var1, var2, "correlation undefined for zero variance");
        return Ok(f64::NAN);
    }
    Ok(sums.cov / sums.weight / (var1 * var2).sqrt())
}

/// Correlate two raw fields: subtract each field's own weighted mean, then
/// apply [`correlation`].
///
/// # Errors
///
/// Propagates the errors of [`stats`] and [`correlation`].
pub fn field_correlation(
    f1: &MaskedField,
    f2: &MaskedField,
    area: ArrayView2<'_, f64>,
) -> Result<f64> {
    let m1 = weighted_mean(f1, area)?;
    let m2 = weighted_mean(f2, area)?;
    correlation(&f1.demeaned(m1), &f2.demeaned(m2), area)
}

fn weighted_mean(field: &MaskedField, area: ArrayView2<'_, f64>) -> Result<f64> {
    let summary = stats(field, Some(area))?;
    match summary.mean {
        Some(mean) => Ok(mean),
        None => Err(PcolorError::DegenerateWeights { sum: 0.0 }),
    }
}
