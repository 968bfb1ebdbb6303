//! Material model trait.
//!
//! All material descriptions implement [`MaterialModel`], which returns the
//! frequency-dependent relative permittivity and permeability of a region.

use num_complex::Complex64;
use thiserror::Error;

/// Errors from material models.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Frequency {omega} is outside the data range [{min}, {max}]")]
    OutOfRange { omega: f64, min: f64, max: f64 },

    #[error("Material '{0}' is only tabulated at real frequencies")]
    ComplexFrequency(String),

    #[error("Material '{0}' is a perfect conductor and has no interior medium")]
    NotAMedium(String),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Provides the electromagnetic response of a homogeneous region.
///
/// A surface's material decides how many surface-current amplitudes live on
/// each of its edges: a perfect conductor carries only an electric current,
/// while a penetrable body carries both electric and magnetic currents.
pub trait MaterialModel: Send + Sync {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Relative permittivity and permeability $(\epsilon, \mu)$ at angular
    /// frequency `omega`.
    fn eps_mu(&self, omega: Complex64) -> Result<(Complex64, Complex64), MaterialError>;

    /// Whether this material is a perfect electric conductor.
    fn is_pec(&self) -> bool {
        false
    }

    /// Complex refractive index $n = \sqrt{\epsilon\mu}$ at `omega`.
    fn refractive_index(&self, omega: Complex64) -> Result<Complex64, MaterialError> {
        let (eps, mu) = self.eps_mu(omega)?;
        Ok((eps * mu).sqrt())
    }
}

impl std::fmt::Debug for dyn MaterialModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MaterialModel({})", self.name())
    }
}
