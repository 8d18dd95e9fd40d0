//! Row-parallel reductions for the weighted statistics
//!
//! Each row of a field is reduced to a partial result on the rayon pool and the
//! partials are combined in row order by the caller. Because the per-row work and
//! the final combination order never depend on scheduling, the parallel and
//! serial paths produce bit-identical sums.

use rayon::prelude::*;

/// Fields with fewer cells than this are reduced on the calling thread.
pub const PARALLEL_MIN_CELLS: usize = 1 << 16;

/// Reduce every row `0..nrows` with `row_fn`, returning the partials in row order.
///
/// `ncells` is the total cell count and only decides whether the rayon pool is
/// used.
pub fn reduce_rows<T, F>(nrows: usize, ncells: usize, row_fn: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if ncells >= PARALLEL_MIN_CELLS {
        tracing::trace!(
            nrows,
            threads = rayon::current_num_threads(),
            "reducing rows in parallel"
        );
        (0..nrows).into_par_iter().map(row_fn).collect()
    } else {
        (0..nrows).map(row_fn).collect()
    }
}

/// Per-row accumulator for the area-weighted sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSums {
    /// Σ w
    pub weight: f64,
    /// Σ w·s
    pub first: f64,
    /// Σ w·s²
    pub second: f64,
}

impl WeightedSums {
    pub fn add(mut self, w: f64, s: f64) -> Self {
        self.weight += w;
        self.first += w * s;
        self.second += w * s * s;
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            weight: self.weight + other.weight,
            first: self.first + other.first,
            second: self.second + other.second,
        }
    }
}

/// Combine per-row partials sequentially, in row order.
pub fn combine(partials: &[WeightedSums]) -> WeightedSums {
    partials
        .iter()
        .fold(WeightedSums::default(), |acc, &row| acc.merge(row))
}
