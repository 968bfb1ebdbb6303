//! Compute backend trait and row partitioning.
//!
//! The [`ComputeBackend`] trait abstracts over how the rows of an output
//! matrix are distributed across workers, so that the field evaluator in
//! `tessera-core` stays independent of the threading strategy.

use std::sync::Arc;

use ndarray::{Array2, ArrayViewMut1};
use num_complex::Complex64;
use thiserror::Error;

/// Errors originating from compute backends.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),

    #[error("Row {row} failed: {message}")]
    RowFailed { row: usize, message: String },
}

/// Describes the capabilities of a compute backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend_type: BackendType,
    pub workers: usize,
}

/// The type of compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Cpu,
    Sequential,
}

/// Function filling one output row.
///
/// Receives the row index and a mutable view of that row; any error aborts
/// the whole fill.
pub type RowFn<'a> =
    dyn Fn(usize, ArrayViewMut1<'_, Complex64>) -> Result<(), ComputeError> + Send + Sync + 'a;

/// Abstraction over row-parallel execution.
pub trait ComputeBackend: Send + Sync {
    /// Return information about the backend.
    fn device_info(&self) -> DeviceInfo;

    /// Number of workers rows are partitioned across.
    fn workers(&self) -> usize;

    /// Fill every row of `output` by calling `row_fn` exactly once per row.
    ///
    /// Row `nr` is processed by worker `nr % self.workers()`. The call
    /// returns after all workers have finished.
    fn fill_rows(&self, output: &mut Array2<Complex64>, row_fn: &RowFn<'_>)
        -> Result<(), ComputeError>;
}

/// Worker assignment of `n_rows` rows: entry `w` lists the rows worker `w`
/// owns, in increasing order.
pub fn partition_rows(n_rows: usize, workers: usize) -> Vec<Vec<usize>> {
    let workers = workers.max(1);
    (0..workers)
        .map(|w| (w..n_rows).step_by(workers).collect())
        .collect()
}

/// Hardware concurrency detected for this process.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Create the configured backend with `workers` workers (`0` selects the
/// detected concurrency).
pub fn create_backend(workers: usize) -> Result<Arc<dyn ComputeBackend>, ComputeError> {
    let workers = if workers == 0 { available_workers() } else { workers };

    #[cfg(feature = "cpu")]
    {
        if workers > 1 {
            let backend = crate::cpu::CpuBackend::with_workers(workers)?;
            return Ok(Arc::new(backend));
        }
    }

    #[cfg(not(feature = "cpu"))]
    if workers > 1 {
        log::warn!(
            "{} workers requested but the `cpu` feature is disabled; running sequentially",
            workers
        );
    }

    Ok(Arc::new(crate::sequential::SequentialBackend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_is_round_robin() {
        let parts = partition_rows(7, 3);
        assert_eq!(parts, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn test_partition_covers_each_row_once() {
        for workers in [1, 2, 5, 16] {
            let mut seen: Vec<usize> = partition_rows(11, workers).into_iter().flatten().collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..11).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_partition_with_more_workers_than_rows() {
        let parts = partition_rows(2, 4);
        assert_eq!(parts.len(), 4);
        assert!(parts[2].is_empty() && parts[3].is_empty());
    }

    #[test]
    fn test_create_backend_single_worker_is_sequential() {
        let backend = create_backend(1).unwrap();
        assert_eq!(backend.device_info().backend_type, BackendType::Sequential);
        assert_eq!(backend.workers(), 1);
    }
}
