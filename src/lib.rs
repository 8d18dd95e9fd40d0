//! ru_pcolor: plotting support for gridded ocean model fields
//!
//! Everything a pseudo-color (quadrilateral mesh) plot of a 2D field needs
//! before any pixels are drawn: cell-corner coordinates reconstructed from
//! cell centers, axis extents, area-weighted statistics, correlation between
//! two fields, a colormap choice and discrete "nice" color levels with
//! over/under extension colors. Rendering itself is left to the caller.
//!
//! ## Module Organization
//!
//! - [`field`]: masked 2D fields
//! - [`coords`]: center-to-corner coordinate expansion
//! - [`boundary`]: axis extents from the outer ring of a coordinate mesh
//! - [`statistics`]: weighted min/max/mean/std/rms, correlation, section weights
//! - [`colormap`]: colors, built-in colormaps and the automatic choice
//! - [`locator`]: nice level placement
//! - [`levels`]: levels, extension and color tables
//! - [`labels`]: axis label defaults
//! - [`plan`]: single-field, comparison and vertical-section plans
//! - [`parallel`]: thread pool configuration
//! - [`demo`]: synthetic basin used by the binary
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ndarray::array;
//! use ru_pcolor::prelude::*;
//!
//! let field = MaskedField::from_values(array![[1.0, 2.0], [3.0, -9999.0]], Some(-9999.0));
//! let area = array![[1.0, 1.0], [1.0, 1.0]];
//! let plan = xy_plan(&field, None, None, Some(area.view()), &PlotOptions::default()).unwrap();
//! println!("{} levels, colormap {}", plan.colors.levels.len(), plan.colors.colormap);
//! ```

pub mod boundary;
pub mod colormap;
pub mod coords;
pub mod demo;
pub mod errors;
pub mod field;
pub mod labels;
pub mod levels;
pub mod locator;
pub mod parallel;
pub mod plan;
pub mod statistics;

pub use boundary::{boundary_minmax, vector_minmax};
pub use colormap::{pick_colormap, Color, Colormap, ColormapFamily};
pub use coords::{expand, expand_i, expand_j, expand_to_corners, Coordinate, CornerCoords};
pub use errors::{PcolorError, Result};
pub use field::MaskedField;
pub use labels::AxisLabel;
pub use levels::{choose_levels, BinClass, ColorLevels, ColorTable, Extend, LevelSpec};
pub use locator::{NiceLocator, DEFAULT_STEPS};
pub use parallel::{get_parallel_info, ParallelConfig, ParallelInfo};
pub use plan::{
    section_compare_plan, section_plan, xy_compare_plan, xy_plan, PlotOptions, DEFAULT_BINS,
};
pub use statistics::{correlation, field_correlation, section_weights, stats, FieldStats};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::colormap::{pick_colormap, Colormap};
    pub use crate::coords::{expand_to_corners, Coordinate};
    pub use crate::errors::{PcolorError, Result};
    pub use crate::field::MaskedField;
    pub use crate::levels::{choose_levels, Extend, LevelSpec};
    pub use crate::parallel::ParallelConfig;
    pub use crate::plan::{
        section_compare_plan, section_plan, xy_compare_plan, xy_plan, PlotOptions,
    };
    pub use crate::statistics::{correlation, stats, FieldStats};
}
