//! CPU compute backend using Rayon for shared-memory parallelism.

use ndarray::{Array2, ArrayViewMut1, Axis};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::backend::{
    partition_rows, BackendType, ComputeBackend, ComputeError, DeviceInfo, RowFn,
};

/// CPU backend that runs each residue class of rows on its own worker of a
/// dedicated Rayon pool.
pub struct CpuBackend {
    workers: usize,
    pool: rayon::ThreadPool,
}

impl CpuBackend {
    /// Create a CPU backend with a specified worker count.
    pub fn with_workers(workers: usize) -> Result<Self, ComputeError> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tessera-worker-{i}"))
            .build()
            .map_err(|e| ComputeError::PoolBuild(e.to_string()))?;
        Ok(Self { workers, pool })
    }
}

impl ComputeBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} workers)", self.workers),
            backend_type: BackendType::Cpu,
            workers: self.workers,
        }
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn fill_rows(
        &self,
        output: &mut Array2<Complex64>,
        row_fn: &RowFn<'_>,
    ) -> Result<(), ComputeError> {
        // Hand each worker exclusive views of the rows in its residue class.
        let mut rows: Vec<Option<ArrayViewMut1<'_, Complex64>>> =
            output.axis_iter_mut(Axis(0)).map(Some).collect();
        let classes: Vec<Vec<(usize, ArrayViewMut1<'_, Complex64>)>> =
            partition_rows(rows.len(), self.workers)
                .into_iter()
                .map(|class| {
                    class
                        .into_iter()
                        .filter_map(|nr| rows[nr].take().map(|row| (nr, row)))
                        .collect()
                })
                .collect();

        self.pool.install(|| {
            classes.into_par_iter().try_for_each(|class| {
                for (nr, row) in class {
                    row_fn(nr, row)?;
                }
                Ok(())
            })
        })
    }
}
