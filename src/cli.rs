//! Command-line options for the `ru_pcolor` binary, parsed with `clap`.

use clap::{Parser, Subcommand};
use ru_pcolor::levels::Extend;
use ru_pcolor::plan::PlotOptions;

/// Color levels and plot plans for gridded ocean fields
#[derive(Parser, Debug)]
#[command(name = "ru_pcolor", version, about = "Plan pseudo-color plots of gridded fields")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for parallel statistics. Defaults to number of CPU cores.
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Choose a colormap, levels and color table for a data range
    Levels {
        /// Data minimum
        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        /// Data maximum
        #[arg(long, allow_hyphen_values = true)]
        max: f64,

        #[command(flatten)]
        levels: LevelArgs,
    },

    /// Plan single-field and comparison plots of a synthetic ocean basin
    Demo {
        /// Number of columns
        #[arg(long, default_value_t = 48)]
        ni: usize,

        /// Number of rows
        #[arg(long, default_value_t = 32)]
        nj: usize,

        /// No-data value marking land
        #[arg(long, allow_hyphen_values = true, default_value_t = ru_pcolor::demo::LAND)]
        ignore: f64,

        #[command(flatten)]
        levels: LevelArgs,
    },
}

/// Level options shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LevelArgs {
    /// Number of bins for generated levels [default: 35]
    #[arg(long)]
    pub n_bins: Option<usize>,

    /// Color range `lo,hi` or explicit levels `a,b,c,...`
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub limits: Option<Vec<f64>>,

    /// Range or explicit levels for difference panels
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub diff_limits: Option<Vec<f64>>,

    /// Nice-level multipliers within [1, 10], e.g. `1,2,5,10`
    #[arg(long, value_delimiter = ',')]
    pub steps: Option<Vec<f64>>,

    /// Extension: none, min, max or both [default: from the data]
    #[arg(long)]
    pub extend: Option<Extend>,

    /// Colormap name, e.g. seismic, hot_r, spectral, dunne_rainbow
    #[arg(long)]
    pub colormap: Option<String>,

    /// Colormap for difference panels
    #[arg(long)]
    pub diff_colormap: Option<String>,
}

impl LevelArgs {
    pub fn to_options(&self, ignore: Option<f64>) -> PlotOptions {
        PlotOptions {
            n_bins: self.n_bins,
            limits: self.limits.clone(),
            diff_limits: self.diff_limits.clone(),
            steps: self.steps.clone(),
            extend: self.extend,
            colormap: self.colormap.clone(),
            diff_colormap: self.diff_colormap.clone(),
            ignore,
        }
    }
}
