//! "Nice" level generation
//!
//! [`NiceLocator`] places bin edges on round multiples of a power of ten. The
//! allowed multipliers (`steps`, default `1, 2, 2.5, 5, 10`) are widened into a
//! staircase one decade down and one step up, scaled to the decade of the
//! requested bin width, and the smallest step whose aligned grid covers the
//! range in the requested number of bins wins. The result always has exactly
//! `n_bins + 1` edges.
//!
//! Ranges far from zero relative to their width (e.g. `1000.1..1000.3`) are
//! shifted by a power-of-ten offset before the search so the alignment tests do
//! not lose precision.

use crate::errors::{PcolorError, Result};

/// Default multipliers for nice levels
pub const DEFAULT_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

const EXPANDER: f64 = 1e-13;
const TINY: f64 = 1e-14;

/// Generates `n_bins + 1` nice bin edges covering a range
#[derive(Debug, Clone, PartialEq)]
pub struct NiceLocator {
    n_bins: usize,
    steps: Vec<f64>,
    staircase: Vec<f64>,
}

impl NiceLocator {
    /// # Errors
    ///
    /// Returns [`PcolorError::InvalidLevelSpec`] if `n_bins` is zero or `steps` is
    /// empty, not strictly increasing, or leaves `[1, 10]`.
    pub fn new(n_bins: usize, steps: &[f64]) -> Result<Self> {
        if n_bins == 0 {
            return Err(PcolorError::InvalidLevelSpec(
                "n_bins must be at least 1".to_string(),
            ));
        }
        let steps = validate_steps(steps)?;
        // steps[0] == 1 and steps[last] == 10 after validation, so steps[1] exists.
        let mut staircase: Vec<f64> = steps[..steps.len() - 1].iter().map(|s| 0.1 * s).collect();
        staircase.extend_from_slice(&steps);
        staircase.push(10.0 * steps[1]);
        Ok(Self {
            n_bins,
            steps,
            staircase,
        })
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Exactly `n_bins + 1` strictly increasing bin edges covering `[vmin, vmax]`.
    ///
    /// The edges are normally consecutive multiples of the smallest staircase
    /// step that covers the range in `n_bins` aligned bins. When no step does
    /// (typically a single bin over a range that straddles a step multiple) the
    /// outer edges are placed on multiples of the smallest step for which the
    /// resulting bin width is itself a nice number, and the bins are spread
    /// evenly between them.
    pub fn tick_values(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let n = self.n_bins as f64;
        let (vmin, vmax) = nonsingular(vmin, vmax);
        let (scale, offset) = scale_range(vmin, vmax, n);
        let lo = vmin - offset;
        let hi = vmax - offset;
        let raw_step = (hi - lo) / n;

        let mut first_cover = None;
        for step in self.staircase.iter().map(|s| s * scale) {
            if step < raw_step {
                continue;
            }
            let edge = Edge::new(step, offset);
            let low = edge.le(lo);
            let high = edge.ge(hi);
            if high - low <= n {
                tracing::debug!(step, low, n_bins = self.n_bins, "nice levels");
                return (0..=self.n_bins)
                    .map(|k| (low + k as f64) * step + offset)
                    .collect();
            }
            first_cover.get_or_insert((low * step, high * step));
        }

        if let Some((start, stop)) = self.nice_span(lo, hi, scale, offset) {
            tracing::debug!(start, stop, n_bins = self.n_bins, "nice outer edges");
            return self.spread(start, stop, offset);
        }

        tracing::warn!(
            n_bins = self.n_bins,
            "no nice bin width covers the range, spacing bins evenly"
        );
        let (start, stop) = first_cover.unwrap_or((lo, hi));
        self.spread(start, stop, offset)
    }

    /// Outer edges on multiples of the smallest candidate step whose span splits
    /// into `n_bins` bins of a nice width.
    fn nice_span(&self, lo: f64, hi: f64, scale: f64, offset: f64) -> Option<(f64, f64)> {
        let n = self.n_bins as f64;
        (-1..=3)
            .flat_map(|decade| {
                let base = scale * 10f64.powi(decade);
                self.steps.iter().map(move |s| s * base)
            })
            .find_map(|step| {
                let edge = Edge::new(step, offset);
                let start = edge.le(lo) * step;
                let stop = edge.ge(hi) * step;
                let width = (stop - start) / n;
                (width > 0.0 && self.is_nice(width)).then_some((start, stop))
            })
    }

    /// Whether `width` is one of the steps times a power of ten.
    fn is_nice(&self, width: f64) -> bool {
        let mantissa = width / 10f64.powf(width.log10().floor());
        self.steps
            .iter()
            .any(|s| ((mantissa - s) / s).abs() < 1e-9)
    }

    fn spread(&self, start: f64, stop: f64, offset: f64) -> Vec<f64> {
        let width = (stop - start) / self.n_bins as f64;
        (0..=self.n_bins)
            .map(|k| {
                if k == self.n_bins {
                    stop + offset
                } else {
                    start + k as f64 * width + offset
                }
            })
            .collect()
    }
}

/// Add the implied 1 and 10 to `steps` and reject anything else out of order.
fn validate_steps(steps: &[f64]) -> Result<Vec<f64>> {
    if steps.is_empty() {
        return Err(PcolorError::InvalidLevelSpec(
            "steps must not be empty".to_string(),
        ));
    }
    if steps.iter().any(|s| !s.is_finite() || *s < 1.0 || *s > 10.0) {
        return Err(PcolorError::InvalidLevelSpec(format!(
            "steps must lie within [1, 10], got {steps:?}"
        )));
    }
    if steps.windows(2).any(|w| w[1] <= w[0]) {
        return Err(PcolorError::InvalidLevelSpec(format!(
            "steps must be strictly increasing, got {steps:?}"
        )));
    }
    let mut out = Vec::with_capacity(steps.len() + 2);
    if steps[0] != 1.0 {
        out.push(1.0);
    }
    out.extend_from_slice(steps);
    if steps[steps.len() - 1] != 10.0 {
        out.push(10.0);
    }
    Ok(out)
}

/// Widen an empty or vanishing range so a step can be chosen.
fn nonsingular(vmin: f64, vmax: f64) -> (f64, f64) {
    if !vmin.is_finite() || !vmax.is_finite() {
        return (-EXPANDER, EXPANDER);
    }
    let (mut vmin, mut vmax) = if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
    let maxabs = vmin.abs().max(vmax.abs());
    if maxabs < (1e6 / TINY) * f64::MIN_POSITIVE {
        return (-EXPANDER, EXPANDER);
    }
    if vmax - vmin <= maxabs * TINY {
        if vmin == 0.0 && vmax == 0.0 {
            return (-EXPANDER, EXPANDER);
        }
        vmin -= EXPANDER * vmin.abs();
        vmax += EXPANDER * vmax.abs();
    }
    (vmin, vmax)
}

/// Decade of the bin width and, for ranges far from zero, a power-of-ten offset.
fn scale_range(vmin: f64, vmax: f64, n: f64) -> (f64, f64) {
    let dv = (vmax - vmin).abs();
    let meanv = 0.5 * (vmax + vmin);
    let offset = if meanv.abs() / dv < 100.0 {
        0.0
    } else {
        10f64.powf(meanv.abs().log10().floor()).copysign(meanv)
    };
    let scale = 10f64.powf((dv / n).log10().floor());
    (scale, offset)
}

/// Integer multiples of `step` with a rounding tolerance that grows with the offset.
struct Edge {
    step: f64,
    tol: f64,
}

impl Edge {
    fn new(step: f64, offset: f64) -> Self {
        let offset = offset.abs();
        let tol = if offset > 0.0 {
            let digits = (offset / step).log10();
            10f64.powf(digits - 12.0).max(1e-10).min(0.4999)
        } else {
            1e-10
        };
        Self { step, tol }
    }

    fn divmod(&self, x: f64) -> (f64, f64) {
        let m = x.rem_euclid(self.step);
        (((x - m) / self.step).round(), m)
    }

    /// Largest multiple index `k` with `k * step <= x`, allowing for rounding.
    fn le(&self, x: f64) -> f64 {
        let (d, m) = self.divmod(x);
        if (m / self.step - 1.0).abs() < self.tol {
            d + 1.0
        } else {
            d
        }
    }

    /// Smallest multiple index `k` with `k * step >= x`, allowing for rounding.
    fn ge(&self, x: f64) -> f64 {
        let (d, m) = self.divmod(x);
        if (m / self.step).abs() < self.tol {
            d
        } else {
            d + 1.0
        }
    }
}
