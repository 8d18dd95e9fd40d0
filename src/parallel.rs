//! Thread pool configuration
//!
//! Statistics over large fields split their row loops across Rayon's global
//! pool. This module sizes that pool once, before any reduction runs.

use crate::errors::{PcolorError, Result};
use rayon::ThreadPoolBuilder;
use serde::Serialize;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    /// `None` leaves Rayon's default (one thread per logical core)
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Use every available CPU core
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Build the global Rayon pool.
    ///
    /// # Errors
    ///
    /// Returns [`PcolorError::ThreadPoolError`] if `num_threads` is zero or the
    /// global pool was already initialized.
    pub fn setup_global_pool(&self) -> Result<()> {
        let Some(num_threads) = self.num_threads else {
            tracing::info!(
                threads = rayon::current_num_threads(),
                "using default thread pool"
            );
            return Ok(());
        };
        if num_threads == 0 {
            return Err(PcolorError::ThreadPoolError(
                "thread count must be at least 1".to_string(),
            ));
        }
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                PcolorError::ThreadPoolError(format!(
                    "failed to initialize thread pool with {num_threads} threads: {e}"
                ))
            })?;
        tracing::info!(threads = num_threads, "configured thread pool");
        Ok(())
    }

    pub fn current_threads(&self) -> usize {
        rayon::current_num_threads()
    }
}

/// Snapshot of the parallel environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

impl ParallelInfo {
    /// Emit the snapshot at debug level.
    pub fn log(&self) {
        tracing::debug!(
            current_threads = self.current_threads,
            available_cores = self.available_cores,
            available_parallelism = self.available_parallelism,
            "parallel environment"
        );
    }
}
