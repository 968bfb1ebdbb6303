//! # Tessera Core
//!
//! Scattered-field evaluation for Bloch-periodic boundary-element
//! geometries. Given the RWG surface-current amplitudes produced by a BEM
//! solve, this crate computes the electric and magnetic fields they radiate
//! at arbitrary points, adds any incident fields, and reduces the result to
//! user-requested scalar field functions.
//!
//! ## Architecture
//!
//! [`engine::FieldEngine`] validates a batch of points and dispatches it to
//! a row-parallel [`tessera_compute::ComputeBackend`]. Every row is handled
//! by [`batch::BatchEvaluator`], which sums the fields of every basis
//! function ([`fields::FieldContext`]) from their reduced potentials
//! ([`potentials`]) under a [`periodic::PeriodicKernel`].
//!
//! ## Modules
//!
//! - [`engine`] — Batch orchestration and the error type.
//! - [`batch`] — Per-row evaluation and per-region media.
//! - [`fields`] — Sign-aware superposition over surfaces.
//! - [`potentials`] — Reduced potentials by 25-point triangle quadrature.
//! - [`periodic`] — Periodic Green's function kernels.
//! - [`field_functions`] — Scalar field-function vocabulary.
//! - [`incident`] — Incident-field sources.
//! - [`region`] — Point-to-region lookup.
//! - [`coefficients`] — Surface-current coefficient vectors.
//! - [`types`] — Constants and field-vector helpers.

pub mod batch;
pub mod coefficients;
pub mod engine;
pub mod field_functions;
pub mod fields;
pub mod incident;
pub mod periodic;
pub mod potentials;
pub mod region;
pub mod types;

#[cfg(test)]
mod testing;

pub use coefficients::CoefficientVector;
pub use engine::{EngineConfig, FieldEngine, FieldError, FieldQuery};
pub use field_functions::{
    parse_function_list, FieldFunction, FieldFunctionParser, StandardFieldFunctions,
    DEFAULT_FUNCTIONS,
};
pub use incident::{IncidentField, PlaneWave};
pub use periodic::{FreeSpaceKernel, GreensValue, LatticeSumKernel, PeriodicKernel};
pub use region::{ExteriorOnly, FixedRegion, RegionResolver};
pub use types::{SixVector, ZVAC};
