//! # Tessera Compute
//!
//! Compute backend abstraction for the Tessera framework. This crate
//! provides a [`ComputeBackend`](backend::ComputeBackend) trait: a
//! "parallel-for over row indices" that fills the rows of an output matrix
//! from a row function, isolating the physics code from threading details.
//!
//! Rows are partitioned round-robin: row `nr` belongs to worker
//! `nr % workers`. Each worker owns its rows exclusively, so no locking is
//! needed and the result does not depend on the worker count.
//!
//! ## Available backends
//!
//! | Backend | Feature flag | Notes |
//! |---------|-------------|-------|
//! | CPU (Rayon) | `cpu` (default) | Dedicated pool sized to the worker count |
//! | Sequential | always | Runs every row on the calling thread |

pub mod backend;
pub mod sequential;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use backend::{
    available_workers, create_backend, partition_rows, BackendType, ComputeBackend, ComputeError,
    DeviceInfo, RowFn,
};
pub use sequential::SequentialBackend;

#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
