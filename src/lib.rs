//! # Tessera
//!
//! Scattered-field evaluation for Bloch-periodic RWG boundary-element
//! geometries. This crate re-exports the field engine of `tessera-core`
//! together with the geometry, material and compute crates it is built on.
//!
//! ```no_run
//! use std::sync::Arc;
//! use num_complex::Complex64;
//! use tessera::geometry::{Geometry, Lattice};
//! use tessera::{FieldEngine, FieldQuery, FreeSpaceKernel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let geometry = Geometry::new(vec![], vec![], Lattice::none())?;
//! let engine = FieldEngine::new(Arc::new(geometry), Arc::new(FreeSpaceKernel))?;
//! let query = FieldQuery::new(Complex64::new(1.0, 0.0), [0.0; 3]);
//! let eh = engine.get_fields_at_point(&query, &mut [], [0.0, 0.0, 1.0])?;
//! assert_eq!(eh.len(), 6);
//! # Ok(())
//! # }
//! ```

pub use tessera_core::*;

pub use tessera_compute as compute;
pub use tessera_geometry as geometry;
pub use tessera_materials as materials;
