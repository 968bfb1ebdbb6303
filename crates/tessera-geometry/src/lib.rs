//! # Tessera Geometry
//!
//! Geometry model for the Tessera framework. This crate provides:
//!
//! - **Mesh entities** ([`mesh`]) — Panels (triangles), RWG edges, and
//!   surfaces with their material and containing surface.
//! - **Geometry** ([`geometry`]) — The validated collection of surfaces,
//!   the containment forest, per-surface basis-function offsets, and typed
//!   vertex accessors.
//! - **Surface currents** ([`currents`]) — How many current amplitudes each
//!   edge carries and how they are read out of a coefficient vector.
//! - **Lattice** ([`lattice`]) — The 0-, 1- or 2-dimensional periodicity of
//!   the geometry.

pub mod currents;
pub mod geometry;
pub mod lattice;
pub mod mesh;

pub use currents::{CurrentAmplitudes, PecCurrents, PenetrableCurrents, SurfaceCurrents};
pub use geometry::{Geometry, GeometryError, Region};
pub use lattice::Lattice;
pub use mesh::{Edge, EdgeSpec, EdgeVertex, Panel, Surface, SurfaceSpec};
