//! Masked 2D fields
//!
//! A [`MaskedField`] pairs a `(nj, ni)` array of values with a boolean validity
//! mask of the same shape. The mask is decided once, when the field is built, and
//! every downstream computation consults only the mask. A legitimate data value
//! that happens to equal a no-data sentinel is therefore never silently dropped
//! after construction, and a sentinel is never silently averaged in.

use crate::errors::{PcolorError, Result};
use ndarray::{Array2, ArrayView2, Zip};

/// A 2D field with an explicit validity mask (`true` = has data)
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedField {
    values: Array2<f64>,
    valid: Array2<bool>,
}

impl MaskedField {
    /// Wrap a plain array. Non-finite entries (NaN, ±inf) are marked invalid.
    pub fn new(values: Array2<f64>) -> Self {
        let valid = values.mapv(f64::is_finite);
        Self { values, valid }
    }

    /// Wrap an array with a caller-supplied validity mask.
    ///
    /// Cells are valid only where the mask is `true` *and* the value is finite.
    ///
    /// # Errors
    ///
    /// Returns [`PcolorError::ShapeMismatch`] if the mask and values differ in shape.
    pub fn with_mask(values: Array2<f64>, valid: Array2<bool>) -> Result<Self> {
        if values.shape() != valid.shape() {
            return Err(PcolorError::shape_mismatch(
                "validity mask",
                values.shape(),
                valid.shape(),
            ));
        }
        let mut valid = valid;
        Zip::from(&mut valid)
            .and(&values)
            .for_each(|ok, &v| *ok = *ok && v.is_finite());
        Ok(Self { values, valid })
    }

    /// Mask every cell whose value equals the no-data value `ignore`.
    pub fn with_ignore_value(values: Array2<f64>, ignore: f64) -> Self {
        let valid = values.mapv(|v| v.is_finite() && v != ignore);
        Self { values, valid }
    }

    /// Build from an optional sentinel: `Some(v)` masks `v`, `None` only masks non-finite values.
    pub fn from_values(values: Array2<f64>, ignore: Option<f64>) -> Self {
        match ignore {
            Some(ignore) => Self::with_ignore_value(values, ignore),
            None => Self::new(values),
        }
    }

    /// `(nj, ni)`
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Raw values, including those under the mask.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn validity(&self) -> ArrayView2<'_, bool> {
        self.valid.view()
    }

    pub fn is_valid(&self, j: usize, i: usize) -> bool {
        self.valid.get((j, i)).copied().unwrap_or(false)
    }

    /// Value at `(j, i)` or `None` when masked or out of bounds.
    pub fn get(&self, j: usize, i: usize) -> Option<f64> {
        if self.is_valid(j, i) {
            self.values.get((j, i)).copied()
        } else {
            None
        }
    }

    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&ok| ok).count()
    }

    /// Iterate over the unmasked values in row-major order.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .zip(self.valid.iter())
            .filter_map(|(&v, &ok)| if ok { Some(v) } else { None })
    }

    /// `self - other`, valid only where both inputs are valid.
    ///
    /// # Errors
    ///
    /// Returns [`PcolorError::ShapeMismatch`] if the fields differ in shape.
    pub fn difference(&self, other: &MaskedField) -> Result<MaskedField> {
        if self.shape() != other.shape() {
            return Err(PcolorError::shape_mismatch(
                "field difference",
                self.shape(),
                other.shape(),
            ));
        }
        let values = &self.values - &other.values;
        let valid = Zip::from(&self.valid)
            .and(&other.valid)
            .map_collect(|&a, &b| a && b);
        Ok(Self { values, valid })
    }

    /// Subtract `mean` from every value, keeping the mask.
    pub fn demeaned(&self, mean: f64) -> MaskedField {
        Self {
            values: self.values.mapv(|v| v - mean),
            valid: self.valid.clone(),
        }
    }

    /// Multiply every value by `factor`, keeping the mask.
    pub fn scaled(&self, factor: f64) -> MaskedField {
        Self {
            values: self.values.mapv(|v| v * factor),
            valid: self.valid.clone(),
        }
    }
}

impl From<Array2<f64>> for MaskedField {
    fn from(values: Array2<f64>) -> Self {
        Self::new(values)
    }
}
