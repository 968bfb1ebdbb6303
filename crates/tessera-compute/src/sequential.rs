//! Sequential backend: every row runs on the calling thread.

use ndarray::{Array2, Axis};
use num_complex::Complex64;

use crate::backend::{BackendType, ComputeBackend, ComputeError, DeviceInfo, RowFn};

/// Single-worker backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBackend;

impl ComputeBackend for SequentialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Sequential".into(),
            backend_type: BackendType::Sequential,
            workers: 1,
        }
    }

    fn workers(&self) -> usize {
        1
    }

    fn fill_rows(
        &self,
        output: &mut Array2<Complex64>,
        row_fn: &RowFn<'_>,
    ) -> Result<(), ComputeError> {
        for (nr, row) in output.axis_iter_mut(Axis(0)).enumerate() {
            row_fn(nr, row)?;
        }
        Ok(())
    }
}
