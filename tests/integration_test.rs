use ndarray::{array, Array2};
use ru_pcolor::demo::{synthetic_basin, LAND};
use ru_pcolor::errors::{PcolorError, Result};
use ru_pcolor::field::MaskedField;
use ru_pcolor::labels::AxisLabel;
use ru_pcolor::levels::Extend;
use ru_pcolor::plan::{
    section_compare_plan, section_plan, xy_compare_plan, xy_plan, PlotOptions, DEFAULT_BINS,
};
use ru_pcolor::Coordinate;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

fn sample_field() -> MaskedField {
    MaskedField::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
}

fn section_inputs() -> (MaskedField, Array2<f64>) {
    let field = MaskedField::new(array![[1.0, 2.0], [3.0, 4.0]]);
    let z = array![[0.0, 0.0], [-10.0, -20.0], [-30.0, -50.0]];
    (field, z)
}

#[test]
fn test_xy_plan_with_coordinates() -> Result<()> {
    let field = sample_field();
    let x = Coordinate::from(vec![10.0, 20.0, 30.0]);
    let y = Coordinate::from(vec![0.0, 10.0]);
    let area = Array2::from_elem((2, 3), 1.0);

    let plan = xy_plan(&field, Some(&x), Some(&y), Some(area.view()), &PlotOptions::default())?;

    assert_eq!(plan.corners.dim(), (3, 4));
    assert_eq!(plan.x_extent, (5.0, 35.0));
    assert_eq!(plan.y_extent, (-5.0, 15.0));
    assert_eq!(plan.x_label, AxisLabel::longitude());
    assert_eq!(plan.y_label, AxisLabel::latitude());

    assert_eq!((plan.stats.min, plan.stats.max), (1.0, 6.0));
    assert_close(plan.stats.mean.unwrap_or(f64::NAN), 3.5, 1e-12);

    // Default bin count applies when nothing was requested.
    assert_eq!(plan.colors.levels.len(), DEFAULT_BINS + 1);
    assert_eq!(plan.colors.colormap, "spectral");
    assert_eq!(plan.colors.extend, Extend::Neither);
    assert_eq!(plan.colors.table.bins.len(), DEFAULT_BINS);
    assert!(plan.colors.levels[0] <= 1.0);
    assert!(plan.colors.levels[DEFAULT_BINS] >= 6.0);
    Ok(())
}

#[test]
fn test_xy_plan_index_coordinates() -> Result<()> {
    let plan = xy_plan(&sample_field(), None, None, None, &PlotOptions::default())?;

    assert_eq!(plan.x_extent, (0.0, 3.0));
    assert_eq!(plan.y_extent, (0.0, 2.0));
    assert_eq!(plan.x_label.text(), "i");
    assert_eq!(plan.y_label.text(), "j");
    assert!(!plan.stats.has_moments());
    Ok(())
}

#[test]
fn test_xy_plan_options() -> Result<()> {
    let field = sample_field();

    let opts = PlotOptions {
        limits: Some(vec![0.0, 5.0, 10.0, 20.0]),
        ..PlotOptions::default()
    };
    let plan = xy_plan(&field, None, None, None, &opts)?;
    assert_eq!(plan.colors.levels, vec![0.0, 5.0, 10.0, 20.0]);

    // A two-value range without a bin count falls back to the default.
    let opts = PlotOptions {
        limits: Some(vec![0.0, 10.0]),
        ..PlotOptions::default()
    };
    let plan = xy_plan(&field, None, None, None, &opts)?;
    assert_eq!(plan.colors.levels.len(), DEFAULT_BINS + 1);

    let opts = PlotOptions {
        colormap: Some("dunne_rainbow".to_string()),
        n_bins: Some(5),
        extend: Some(Extend::Both),
        ..PlotOptions::default()
    };
    let plan = xy_plan(&field, None, None, None, &opts)?;
    assert_eq!(plan.colors.colormap, "dunne_rainbow");
    assert_eq!(plan.colors.levels.len(), 6);
    assert!(plan.colors.table.under.is_some() && plan.colors.table.over.is_some());

    let opts = PlotOptions {
        colormap: Some("jet".to_string()),
        ..PlotOptions::default()
    };
    assert!(matches!(
        xy_plan(&field, None, None, None, &opts),
        Err(PcolorError::UnknownColormap { .. })
    ));
    Ok(())
}

#[test]
fn test_xy_compare_plan() -> Result<()> {
    let a = sample_field();
    let b = a.scaled(2.0);
    let area = Array2::from_elem((2, 3), 1.0);

    let plan = xy_compare_plan(&a, &b, None, None, Some(area.view()), &PlotOptions::default())?;
    let cmp = &plan.comparison;

    assert_eq!((cmp.stats_b.min, cmp.stats_b.max), (2.0, 12.0));
    assert_eq!((cmp.stats_diff.min, cmp.stats_diff.max), (-6.0, -1.0));
    assert_close(cmp.stats_diff.mean.unwrap_or(f64::NAN), -3.5, 1e-12);
    assert_close(cmp.correlation.unwrap_or(f64::NAN), 1.0, 1e-12);

    assert_eq!(cmp.combined_range, (1.0, 12.0));
    assert_eq!(cmp.field_colors.colormap, "hot");
    assert_eq!(cmp.diff_colors.colormap, "spectral");
    assert!(cmp.field_colors.levels[0] <= 1.0);
    assert!(*cmp.field_colors.levels.last().unwrap_or(&f64::NAN) >= 12.0);
    Ok(())
}

#[test]
fn test_xy_compare_plan_with_limits() -> Result<()> {
    let a = sample_field();
    let b = a.scaled(2.0);
    let opts = PlotOptions {
        n_bins: Some(5),
        limits: Some(vec![0.0, 10.0]),
        diff_colormap: Some("seismic".to_string()),
        ..PlotOptions::default()
    };

    let plan = xy_compare_plan(&a, &b, None, None, None, &opts)?;
    let cmp = &plan.comparison;

    assert_eq!(cmp.field_colors.levels, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(cmp.field_colors.extend, Extend::Max);
    assert!(cmp.field_colors.table.under.is_none());
    assert!(cmp.field_colors.table.over.is_some());

    assert_eq!(cmp.diff_colors.colormap, "seismic");
    assert_eq!(cmp.diff_colors.levels.len(), 6);
    // No weights, no correlation.
    assert_eq!(cmp.correlation, None);
    Ok(())
}

#[test]
fn test_xy_compare_plan_shape_mismatch() {
    let a = sample_field();
    let b = MaskedField::new(Array2::zeros((3, 2)));
    assert!(matches!(
        xy_compare_plan(&a, &b, None, None, None, &PlotOptions::default()),
        Err(PcolorError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_section_plan() -> Result<()> {
    let (field, z) = section_inputs();
    let y = array![0.0, 1.0, 3.0];

    let plan = section_plan(&field, y.view(), z.view(), &PlotOptions::default())?;

    assert_eq!(plan.y_edges.to_vec(), vec![0.0, 1.0, 3.0]);
    assert_eq!(plan.weights, array![[10.0, 40.0], [20.0, 60.0]]);
    assert_eq!(plan.y_extent, (0.0, 3.0));
    assert_eq!(plan.z_extent, (-50.0, 0.0));
    assert_eq!(plan.y_label, AxisLabel::latitude());
    assert_eq!(plan.z_label, AxisLabel::elevation());

    // (10·1 + 40·2 + 20·3 + 60·4) / 130
    assert_close(plan.stats.mean.unwrap_or(f64::NAN), 3.0, 1e-12);
    assert_eq!(plan.colors.colormap, "spectral");
    Ok(())
}

#[test]
fn test_section_plan_from_centers() -> Result<()> {
    let (field, z) = section_inputs();
    let y = array![0.5, 2.0];

    let plan = section_plan(&field, y.view(), z.view(), &PlotOptions::default())?;
    assert_eq!(plan.y_edges.to_vec(), vec![-0.25, 1.25, 2.75]);
    assert_close(plan.weights[[0, 0]], 15.0, 1e-12);
    Ok(())
}

#[test]
fn test_section_plan_shape_errors() {
    let (field, z) = section_inputs();
    let opts = PlotOptions::default();

    let bad_y = array![0.0, 1.0, 2.0, 3.0];
    assert!(matches!(
        section_plan(&field, bad_y.view(), z.view(), &opts),
        Err(PcolorError::ShapeMismatch { .. })
    ));

    let bad_z = Array2::<f64>::zeros((2, 2));
    let y = array![0.0, 1.0, 3.0];
    assert!(matches!(
        section_plan(&field, y.view(), bad_z.view(), &opts),
        Err(PcolorError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_section_compare_plan() -> Result<()> {
    let (a, z) = section_inputs();
    let b = a.scaled(-1.0);
    let y = array![0.0, 1.0, 3.0];

    let plan = section_compare_plan(&a, &b, y.view(), z.view(), &PlotOptions::default())?;
    let cmp = &plan.comparison;

    assert_close(cmp.correlation.unwrap_or(f64::NAN), -1.0, 1e-12);
    assert_eq!(cmp.combined_range, (-4.0, 4.0));
    assert_eq!(cmp.field_colors.colormap, "seismic");
    assert_eq!((cmp.stats_diff.min, cmp.stats_diff.max), (2.0, 8.0));
    Ok(())
}

#[test]
fn test_demo_basin_plans() -> Result<()> {
    let basin = synthetic_basin(12, 8)?;
    let opts = PlotOptions {
        ignore: Some(LAND),
        ..PlotOptions::default()
    };
    let field = opts.mask(basin.depth.clone());
    assert!(field.valid_count() > 0);
    assert!(field.valid_count() < 12 * 8);

    let x = Coordinate::from(basin.lon.clone());
    let y = Coordinate::from(basin.lat.clone());
    let plan = xy_plan(&field, Some(&x), Some(&y), Some(basin.area.view()), &opts)?;
    assert_eq!(plan.corners.dim(), (9, 13));
    assert!(plan.stats.min > LAND);
    assert!(plan.y_extent.0 < -39.0 && plan.y_extent.1 > 39.0);

    let compare = xy_compare_plan(
        &field,
        &field.scaled(0.8),
        Some(&x),
        Some(&y),
        Some(basin.area.view()),
        &opts,
    )?;
    assert_close(compare.comparison.correlation.unwrap_or(f64::NAN), 1.0, 1e-9);

    assert!(synthetic_basin(1, 5).is_err());
    Ok(())
}

#[test]
fn test_plans_serialize_to_json() -> Result<()> {
    let area = Array2::from_elem((2, 3), 1.0);
    let plan = xy_plan(&sample_field(), None, None, Some(area.view()), &PlotOptions::default())?;

    let json = serde_json::to_value(&plan).map_err(|e| PcolorError::InvalidLevelSpec(e.to_string()))?;
    assert_eq!(json["colors"]["extend"], "neither");
    assert_eq!(
        json["colors"]["levels"].as_array().map(Vec::len),
        Some(DEFAULT_BINS + 1)
    );
    assert_eq!(json["x_label"]["label"], "i");

    let opts: PlotOptions = serde_json::from_str(r#"{"n_bins": 5, "extend": "both"}"#)
        .map_err(|e| PcolorError::InvalidLevelSpec(e.to_string()))?;
    assert_eq!(opts.n_bins, Some(5));
    assert_eq!(opts.extend, Some(Extend::Both));
    assert!(opts.limits.is_none());
    Ok(())
}
