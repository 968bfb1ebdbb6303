//! # Tessera Materials
//!
//! Material models for the Tessera framework. Every surface of a geometry,
//! and the unbounded exterior region, carries a [`MaterialModel`](provider::MaterialModel)
//! that returns the relative permittivity and permeability at a (possibly
//! complex) angular frequency.
//!
//! ## Available models
//!
//! | Model | Module | Notes |
//! |-------|--------|-------|
//! | Perfect electric conductor | [`models::Pec`] | Single current type; not a medium |
//! | Vacuum | [`models::Vacuum`] | ε = μ = 1 |
//! | Constant ε, μ | [`models::ConstantEpsMu`] | Non-dispersive |
//! | Drude metal | [`models::Drude`] | Free-electron dispersion |
//! | Lorentz oscillator | [`models::Lorentz`] | Single resonance |
//! | Tabulated | [`tabulated::TabulatedMaterial`] | Cubic-spline interpolated |
//!
//! Frequencies are angular frequencies in units of c/L, where L is the
//! geometry length unit, so the wavenumber inside a medium is
//! $k = \omega\sqrt{\epsilon\mu}$.

pub mod models;
pub mod provider;
pub mod spline;
pub mod tabulated;

pub use models::{ConstantEpsMu, Drude, Lorentz, Pec, Vacuum};
pub use provider::{MaterialError, MaterialModel};
pub use tabulated::TabulatedMaterial;
