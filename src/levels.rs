//! Discrete color levels with over/under extension
//!
//! [`choose_levels`] turns a data range (or caller-supplied limits) into bin
//! edges, decides whether values fall outside those edges and need dedicated
//! under/over colors, and samples a [`ColorTable`] from a colormap sized to hold
//! the extension colors as well as one color per bin.

use crate::colormap::{Color, Colormap};
use crate::errors::{PcolorError, Result};
use crate::locator::{NiceLocator, DEFAULT_STEPS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which ends of the color scale need a distinguished overflow color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extend {
    #[default]
    Neither,
    Min,
    Max,
    Both,
}

impl Extend {
    pub const fn has_min(self) -> bool {
        matches!(self, Self::Min | Self::Both)
    }

    pub const fn has_max(self) -> bool {
        matches!(self, Self::Max | Self::Both)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neither => "neither",
            Self::Min => "min",
            Self::Max => "max",
            Self::Both => "both",
        }
    }

    /// Compare the data extremes with the outer level edges.
    pub fn detect(min: f64, max: f64, levels: &[f64]) -> Self {
        let (Some(&first), Some(&last)) = (levels.first(), levels.last()) else {
            return Self::Neither;
        };
        match (min < first, max > last) {
            (true, true) => Self::Both,
            (true, false) => Self::Min,
            (false, true) => Self::Max,
            (false, false) => Self::Neither,
        }
    }
}

impl fmt::Display for Extend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extend {
    type Err = PcolorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "neither" => Ok(Self::Neither),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "both" => Ok(Self::Both),
            other => Err(PcolorError::InvalidLevelSpec(format!(
                "extend must be one of none, min, max, both; got '{other}'"
            ))),
        }
    }
}

/// How the levels should be chosen
///
/// - `n_bins` only: nice levels over the data range
/// - `limits` of length 2 plus `n_bins`: nice levels over that range
/// - `limits` longer than 2, no `n_bins`: the limits are the levels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub n_bins: Option<usize>,
    pub limits: Option<Vec<f64>>,
    pub steps: Vec<f64>,
    /// `None` means detect from the data
    pub extend: Option<Extend>,
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self {
            n_bins: None,
            limits: None,
            steps: DEFAULT_STEPS.to_vec(),
            extend: None,
        }
    }
}

impl LevelSpec {
    pub fn with_bins(n_bins: usize) -> Self {
        Self {
            n_bins: Some(n_bins),
            ..Self::default()
        }
    }

    pub fn with_levels(levels: Vec<f64>) -> Self {
        Self {
            limits: Some(levels),
            ..Self::default()
        }
    }

    pub fn limits(mut self, limits: Vec<f64>) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn steps(mut self, steps: Vec<f64>) -> Self {
        self.steps = steps;
        self
    }

    pub fn extend(mut self, extend: Extend) -> Self {
        self.extend = Some(extend);
        self
    }

    /// Check the bin/limit combination without computing anything.
    ///
    /// # Errors
    ///
    /// Returns [`PcolorError::InvalidLevelSpec`] for a missing, ambiguous or
    /// malformed combination.
    pub fn validate(&self) -> Result<()> {
        self.source().map(|_| ())
    }

    fn source(&self) -> Result<LevelSource<'_>> {
        match (self.n_bins, self.limits.as_deref()) {
            (None, None) => invalid("at least one of limits or n_bins is required"),
            (_, Some(limits)) if limits.len() < 2 => invalid("limits must be at least 2 values long"),
            (Some(0), _) => invalid("n_bins must be at least 1"),
            (None, Some(&[_, _])) => {
                invalid("n_bins must be provided when limits specify a color range")
            }
            (Some(_), Some(limits)) if limits.len() > 2 => {
                invalid("n_bins cannot be provided when limits specify color levels")
            }
            (Some(n), None) => Ok(LevelSource::DataRange(n)),
            (Some(n), Some(&[lo, hi])) => Ok(LevelSource::Range(lo, hi, n)),
            (_, Some(levels)) => {
                if levels.iter().any(|v| !v.is_finite()) {
                    return invalid("explicit levels must be finite");
                }
                if levels.windows(2).any(|w| w[1] <= w[0]) {
                    return invalid("explicit levels must be strictly increasing");
                }
                Ok(LevelSource::Explicit(levels))
            }
        }
    }
}

fn invalid<T>(msg: &str) -> Result<T> {
    Err(PcolorError::InvalidLevelSpec(msg.to_string()))
}

enum LevelSource<'a> {
    DataRange(usize),
    Range(f64, f64, usize),
    Explicit(&'a [f64]),
}

/// Colors for a discrete normalization: one per bin plus optional under/over
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorTable {
    pub bins: Vec<Color>,
    pub under: Option<Color>,
    pub over: Option<Color>,
}

/// Where a value falls relative to the levels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinClass {
    Under,
    Bin(usize),
    Over,
    /// NaN
    Invalid,
}

/// Levels, extension and color table for one plot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorLevels {
    pub levels: Vec<f64>,
    pub extend: Extend,
    pub colormap: String,
    pub table: ColorTable,
}

impl ColorLevels {
    pub fn n_colors(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Locate `value` among the bins. Bins are closed below and open above,
    /// except the last, which also holds the top edge.
    pub fn classify(&self, value: f64) -> BinClass {
        let (Some(&first), Some(&last)) = (self.levels.first(), self.levels.last()) else {
            return BinClass::Invalid;
        };
        if value.is_nan() {
            BinClass::Invalid
        } else if value < first {
            BinClass::Under
        } else if value > last {
            BinClass::Over
        } else {
            let below = self.levels.partition_point(|&edge| edge <= value);
            BinClass::Bin(below.saturating_sub(1).min(self.n_colors().saturating_sub(1)))
        }
    }

    /// Color for `value`, or `None` when it falls outside the levels on a side
    /// without an extension color (or is NaN).
    pub fn color_for(&self, value: f64) -> Option<Color> {
        match self.classify(value) {
            BinClass::Under => self.table.under,
            BinClass::Over => self.table.over,
            BinClass::Bin(k) => self.table.bins.get(k).copied(),
            BinClass::Invalid => None,
        }
    }
}

/// Choose levels, extension and colors for data spanning `[min, max]`.
///
/// The colormap is sampled at `n_colors + e_min + e_max` evenly spaced points,
/// where `e_min`/`e_max` are 1 when the extension covers that end. The first
/// sample becomes the under color and the last the over color when needed; the
/// rest map one-to-one onto the bins.
///
/// # Errors
///
/// Returns [`PcolorError::InvalidLevelSpec`] when neither bins nor limits are
/// given, when a 2-value range comes without `n_bins`, when explicit levels come
/// with `n_bins`, or when the levels or steps are malformed.
pub fn choose_levels(
    min: f64,
    max: f64,
    colormap: &Colormap,
    spec: &LevelSpec,
) -> Result<ColorLevels> {
    let levels = match spec.source()? {
        LevelSource::DataRange(n) => NiceLocator::new(n, &spec.steps)?.tick_values(min, max),
        LevelSource::Range(lo, hi, n) => NiceLocator::new(n, &spec.steps)?.tick_values(lo, hi),
        LevelSource::Explicit(levels) => levels.to_vec(),
    };

    let n_colors = levels.len() - 1;
    let extend = spec
        .extend
        .unwrap_or_else(|| Extend::detect(min, max, &levels));
    let e_min = usize::from(extend.has_min());
    let e_max = usize::from(extend.has_max());

    let samples = colormap.lut(n_colors + e_min + e_max);
    let table = ColorTable {
        bins: samples[e_min..e_min + n_colors].to_vec(),
        under: if extend.has_min() { samples.first().copied() } else { None },
        over: if extend.has_max() { samples.last().copied() } else { None },
    };

    tracing::debug!(
        ?levels,
        %extend,
        colormap = colormap.name(),
        "chose color levels"
    );
    Ok(ColorLevels {
        levels,
        extend,
        colormap: colormap.name().to_string(),
        table,
    })
}
