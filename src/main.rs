//! Entry point for the ru_pcolor binary.
//! Handles CLI parsing and logging setup, and dispatches the `levels` and `demo` commands.

use clap::Parser;
use ru_pcolor::demo::synthetic_basin;
use ru_pcolor::levels::{choose_levels, ColorLevels};
use ru_pcolor::parallel::{get_parallel_info, ParallelConfig};
use ru_pcolor::plan::{
    resolve_colormap, xy_compare_plan, xy_plan, ComparePlan, Comparison, XyPlan,
};
use ru_pcolor::statistics::FieldStats;
use ru_pcolor::Coordinate;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::{Args, Command};

/// Comparison partner of the demo field is this fraction of it
const DEMO_SCALE: f64 = 0.8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    ParallelConfig::new(args.threads).setup_global_pool()?;
    get_parallel_info().log();

    match &args.command {
        Command::Levels { min, max, levels } => {
            let opts = levels.to_options(None);
            let colormap = resolve_colormap(opts.colormap.as_deref(), *min, *max)?;
            let colors = choose_levels(
                *min,
                *max,
                &colormap,
                &opts.level_spec(opts.limits.as_deref()),
            )?;
            if args.json {
                emit_json(&colors)?;
            } else {
                print_levels("Levels", &colors);
            }
        }
        Command::Demo {
            ni,
            nj,
            ignore,
            levels,
        } => {
            let opts = levels.to_options(Some(*ignore));
            let basin = synthetic_basin(*ni, *nj)?;
            let x = Coordinate::from(basin.lon);
            let y = Coordinate::from(basin.lat);
            let field = opts.mask(basin.depth);
            let scaled = field.scaled(DEMO_SCALE);

            let single = xy_plan(&field, Some(&x), Some(&y), Some(basin.area.view()), &opts)?;
            let compare = xy_compare_plan(
                &field,
                &scaled,
                Some(&x),
                Some(&y),
                Some(basin.area.view()),
                &opts,
            )?;

            if args.json {
                #[derive(Serialize)]
                struct DemoReport<'a> {
                    single: &'a XyPlan,
                    compare: &'a ComparePlan,
                }
                emit_json(&DemoReport {
                    single: &single,
                    compare: &compare,
                })?;
            } else {
                print_xy(&single);
                print_comparison(&compare.comparison);
            }
        }
    }

    Ok(())
}

fn emit_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_xy(plan: &XyPlan) {
    let (nj, ni) = plan.corners.dim();
    println!("Corner mesh: {nj} x {ni}");
    println!(
        "{}: {:.3} .. {:.3}",
        plan.x_label, plan.x_extent.0, plan.x_extent.1
    );
    println!(
        "{}: {:.3} .. {:.3}",
        plan.y_label, plan.y_extent.0, plan.y_extent.1
    );
    print_stats("Field", &plan.stats);
    print_levels("Field levels", &plan.colors);
}

fn print_comparison(cmp: &Comparison) {
    print_stats("A", &cmp.stats_a);
    print_stats("B", &cmp.stats_b);
    print_stats("A - B", &cmp.stats_diff);
    match cmp.correlation {
        Some(r) => println!("Correlation: {r:.6}"),
        None => println!("Correlation: n/a"),
    }
    print_levels("Shared levels", &cmp.field_colors);
    print_levels("Difference levels", &cmp.diff_colors);
}

fn print_stats(title: &str, stats: &FieldStats) {
    let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6}"));
    println!(
        "{title}: min={:.6} max={:.6} mean={} std={} rms={}",
        stats.min,
        stats.max,
        show(stats.mean),
        show(stats.std),
        show(stats.rms)
    );
}

fn print_levels(title: &str, colors: &ColorLevels) {
    println!(
        "{title}: colormap={} extend={} bins={}",
        colors.colormap,
        colors.extend,
        colors.n_colors()
    );
    println!("  levels: {:?}", colors.levels);
    if let Some(under) = colors.table.under {
        println!("  under: {}", under.to_hex());
    }
    let bins: Vec<String> = colors.table.bins.iter().map(|c| c.to_hex()).collect();
    println!("  colors: {}", bins.join(" "));
    if let Some(over) = colors.table.over {
        println!("  over: {}", over.to_hex());
    }
}
