//! Per-plot orchestration
//!
//! A plan gathers everything a renderer needs for one pseudo-color figure:
//! corner coordinates, axis extents, the statistics to annotate, the colormap
//! choice and the discrete color levels. Three figure kinds are covered:
//!
//! - [`xy_plan`]: a single horizontal field
//! - [`xy_compare_plan`]: two horizontal fields, their difference and correlation
//! - [`section_plan`] / [`section_compare_plan`]: vertical sections whose cell
//!   weights come from column widths and layer thicknesses

use crate::boundary::{boundary_minmax, vector_minmax};
use crate::colormap::{pick_colormap, Colormap};
use crate::coords::{expand_to_corners, section_edges, Coordinate, CornerCoords};
use crate::errors::{PcolorError, Result};
use crate::field::MaskedField;
use crate::labels::{horizontal_labels, section_labels, AxisLabel};
use crate::levels::{choose_levels, ColorLevels, Extend, LevelSpec};
use crate::locator::DEFAULT_STEPS;
use crate::statistics::{correlation, section_weights, stats, FieldStats};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Bin count used when levels have to be generated and none was requested
pub const DEFAULT_BINS: usize = 35;

/// Caller configuration shared by all plan kinds
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    pub n_bins: Option<usize>,
    /// Range `[lo, hi]` or explicit levels for the field panels
    pub limits: Option<Vec<f64>>,
    /// Range or explicit levels for the difference panel
    pub diff_limits: Option<Vec<f64>>,
    /// Nice-level multipliers; `None` uses `1, 2, 2.5, 5, 10`
    pub steps: Option<Vec<f64>>,
    pub extend: Option<Extend>,
    /// Colormap override for the field panels
    pub colormap: Option<String>,
    /// Colormap override for the difference panel
    pub diff_colormap: Option<String>,
    /// No-data value
    pub ignore: Option<f64>,
}

impl PlotOptions {
    /// Wrap raw values, masking the configured no-data value.
    pub fn mask(&self, values: Array2<f64>) -> MaskedField {
        MaskedField::from_values(values, self.ignore)
    }

    /// Level configuration for `limits`, filling in [`DEFAULT_BINS`] when bins
    /// are needed (no limits, or a 2-value range) and were not requested.
    pub fn level_spec(&self, limits: Option<&[f64]>) -> LevelSpec {
        let needs_bins = limits.map_or(true, |l| l.len() == 2);
        let n_bins = match self.n_bins {
            None if needs_bins => Some(DEFAULT_BINS),
            n => n,
        };
        LevelSpec {
            n_bins,
            limits: limits.map(<[f64]>::to_vec),
            steps: self
                .steps
                .clone()
                .unwrap_or_else(|| DEFAULT_STEPS.to_vec()),
            extend: self.extend,
        }
    }
}

/// Single horizontal field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XyPlan {
    pub corners: CornerCoords,
    pub x_extent: (f64, f64),
    pub y_extent: (f64, f64),
    pub x_label: AxisLabel,
    pub y_label: AxisLabel,
    pub stats: FieldStats,
    pub colors: ColorLevels,
}

/// Two horizontal fields and their difference `a - b`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparePlan {
    pub corners: CornerCoords,
    pub x_extent: (f64, f64),
    pub y_extent: (f64, f64),
    pub x_label: AxisLabel,
    pub y_label: AxisLabel,
    pub comparison: Comparison,
}

/// Vertical section of one field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionPlan {
    /// Column edges, length `ni + 1`
    pub y_edges: Array1<f64>,
    /// Cell weights from column width times layer thickness
    pub weights: Array2<f64>,
    pub y_extent: (f64, f64),
    pub z_extent: (f64, f64),
    pub y_label: AxisLabel,
    pub z_label: AxisLabel,
    pub stats: FieldStats,
    pub colors: ColorLevels,
}

/// Vertical sections of two fields and their difference
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionComparePlan {
    pub y_edges: Array1<f64>,
    pub weights: Array2<f64>,
    pub y_extent: (f64, f64),
    pub z_extent: (f64, f64),
    pub y_label: AxisLabel,
    pub z_label: AxisLabel,
    pub comparison: Comparison,
}

/// Statistics and color levels shared by both comparison kinds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub stats_a: FieldStats,
    pub stats_b: FieldStats,
    pub stats_diff: FieldStats,
    /// `None` without weights; `Some(NaN)` when a field has zero variance
    pub correlation: Option<f64>,
    /// `(min(a, b), max(a, b))`, the range the shared field levels cover
    pub combined_range: (f64, f64),
    pub field_colors: ColorLevels,
    pub diff_colors: ColorLevels,
}

/// Plan a single horizontal field.
///
/// # Errors
///
/// Propagates coordinate, statistics and level errors.
pub fn xy_plan(
    field: &MaskedField,
    x: Option<&Coordinate>,
    y: Option<&Coordinate>,
    area: Option<ArrayView2<'_, f64>>,
    opts: &PlotOptions,
) -> Result<XyPlan> {
    let (x_label, y_label) = horizontal_labels(x.is_some(), y.is_some());
    let corners = expand_to_corners(field.dim(), x, y)?;
    let x_extent = boundary_minmax(corners.x.view())?;
    let y_extent = boundary_minmax(corners.y.view())?;

    let stats = stats(field, area)?;
    let colormap = resolve_colormap(opts.colormap.as_deref(), stats.min, stats.max)?;
    let colors = choose_levels(
        stats.min,
        stats.max,
        &colormap,
        &opts.level_spec(opts.limits.as_deref()),
    )?;

    Ok(XyPlan {
        corners,
        x_extent,
        y_extent,
        x_label,
        y_label,
        stats,
        colors,
    })
}

/// Plan a comparison of two horizontal fields on the same grid.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if the fields differ in shape, and
/// propagates coordinate, statistics and level errors.
pub fn xy_compare_plan(
    a: &MaskedField,
    b: &MaskedField,
    x: Option<&Coordinate>,
    y: Option<&Coordinate>,
    area: Option<ArrayView2<'_, f64>>,
    opts: &PlotOptions,
) -> Result<ComparePlan> {
    check_same_shape(a, b)?;
    let (x_label, y_label) = horizontal_labels(x.is_some(), y.is_some());
    let corners = expand_to_corners(a.dim(), x, y)?;
    let x_extent = boundary_minmax(corners.x.view())?;
    let y_extent = boundary_minmax(corners.y.view())?;
    let comparison = compare(a, b, area, opts)?;

    Ok(ComparePlan {
        corners,
        x_extent,
        y_extent,
        x_label,
        y_label,
        comparison,
    })
}

/// Plan a vertical section of `field` (`nk` layers by `ni` columns).
///
/// `y` holds column centers (length `ni`) or edges (length `ni + 1`); `z` holds
/// the layer interface elevations, shape `(nk + 1, ni)`.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if `y` or `z` do not fit the field, and
/// propagates statistics and level errors.
pub fn section_plan(
    field: &MaskedField,
    y: ArrayView1<'_, f64>,
    z: ArrayView2<'_, f64>,
    opts: &PlotOptions,
) -> Result<SectionPlan> {
    let (y_edges, weights) = section_geometry(field, y, z)?;
    let y_extent = vector_minmax(&y_edges.to_vec())?;
    let z_extent = boundary_minmax(z)?;
    let (y_label, z_label) = section_labels(true, true);

    let stats = stats(field, Some(weights.view()))?;
    let colormap = resolve_colormap(opts.colormap.as_deref(), stats.min, stats.max)?;
    let colors = choose_levels(
        stats.min,
        stats.max,
        &colormap,
        &opts.level_spec(opts.limits.as_deref()),
    )?;

    Ok(SectionPlan {
        y_edges,
        weights,
        y_extent,
        z_extent,
        y_label,
        z_label,
        stats,
        colors,
    })
}

/// Plan a comparison of two vertical sections sharing `y` and `z`.
///
/// # Errors
///
/// Returns [`PcolorError::ShapeMismatch`] if the fields, `y` or `z` disagree in
/// shape, and propagates statistics and level errors.
pub fn section_compare_plan(
    a: &MaskedField,
    b: &MaskedField,
    y: ArrayView1<'_, f64>,
    z: ArrayView2<'_, f64>,
    opts: &PlotOptions,
) -> Result<SectionComparePlan> {
    check_same_shape(a, b)?;
    let (y_edges, weights) = section_geometry(a, y, z)?;
    let y_extent = vector_minmax(&y_edges.to_vec())?;
    let z_extent = boundary_minmax(z)?;
    let (y_label, z_label) = section_labels(true, true);
    let comparison = compare(a, b, Some(weights.view()), opts)?;

    Ok(SectionComparePlan {
        y_edges,
        weights,
        y_extent,
        z_extent,
        y_label,
        z_label,
        comparison,
    })
}

/// Built-in colormap by name, or the heuristic choice for `[min, max]`.
///
/// # Errors
///
/// Returns [`PcolorError::UnknownColormap`] for an unknown override.
pub fn resolve_colormap(name: Option<&str>, min: f64, max: f64) -> Result<Colormap> {
    match name {
        Some(name) => Colormap::by_name(name),
        None => Ok(pick_colormap(min, max).colormap()),
    }
}

fn check_same_shape(a: &MaskedField, b: &MaskedField) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(PcolorError::shape_mismatch(
            "compared fields",
            a.shape(),
            b.shape(),
        ));
    }
    Ok(())
}

fn section_geometry(
    field: &MaskedField,
    y: ArrayView1<'_, f64>,
    z: ArrayView2<'_, f64>,
) -> Result<(Array1<f64>, Array2<f64>)> {
    let (nk, ni) = field.dim();
    if z.dim() != (nk + 1, ni) {
        return Err(PcolorError::shape_mismatch(
            "section interfaces",
            &[nk + 1, ni],
            z.shape(),
        ));
    }
    let y_edges = section_edges(y, ni)?;
    let weights = section_weights(y_edges.view(), z)?;
    Ok((y_edges, weights))
}

fn compare(
    a: &MaskedField,
    b: &MaskedField,
    area: Option<ArrayView2<'_, f64>>,
    opts: &PlotOptions,
) -> Result<Comparison> {
    let diff = a.difference(b)?;
    let stats_a = stats(a, area)?;
    let stats_b = stats(b, area)?;
    let stats_diff = stats(&diff, area)?;

    let correlation = match (area, stats_a.mean, stats_b.mean) {
        (Some(area), Some(mean_a), Some(mean_b)) => Some(correlation(
            &a.demeaned(mean_a),
            &b.demeaned(mean_b),
            area,
        )?),
        _ => None,
    };

    let combined_range = (stats_a.min.min(stats_b.min), stats_a.max.max(stats_b.max));
    tracing::debug!(?combined_range, ?correlation, "comparison statistics");

    let (lo, hi) = combined_range;
    let field_map = resolve_colormap(opts.colormap.as_deref(), lo, hi)?;
    let field_colors = choose_levels(lo, hi, &field_map, &opts.level_spec(opts.limits.as_deref()))?;

    let diff_map = resolve_colormap(opts.diff_colormap.as_deref(), stats_diff.min, stats_diff.max)?;
    let diff_colors = choose_levels(
        stats_diff.min,
        stats_diff.max,
        &diff_map,
        &opts.level_spec(opts.diff_limits.as_deref()),
    )?;

    Ok(Comparison {
        stats_a,
        stats_b,
        stats_diff,
        correlation,
        combined_range,
        field_colors,
        diff_colors,
    })
}
