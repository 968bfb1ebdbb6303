//! Tabulated dielectric functions.
//!
//! Measured $\epsilon(\omega)$ data is interpolated with natural cubic
//! splines on its real and imaginary parts independently. The medium is
//! treated as non-magnetic.

use num_complex::Complex64;

use crate::provider::{MaterialError, MaterialModel};
use crate::spline::CubicSpline;

/// Spline-interpolated material defined on a range of real frequencies.
#[derive(Debug, Clone)]
pub struct TabulatedMaterial {
    name: String,
    spline_real: CubicSpline,
    spline_imag: CubicSpline,
}

impl TabulatedMaterial {
    /// Construct from tabulated data.
    ///
    /// # Arguments
    /// * `name` - Material name.
    /// * `omegas` - Angular frequencies (c/L units), strictly increasing.
    /// * `eps_real` - Real part of $\epsilon(\omega)$.
    /// * `eps_imag` - Imaginary part of $\epsilon(\omega)$.
    pub fn new(
        name: impl Into<String>,
        omegas: Vec<f64>,
        eps_real: Vec<f64>,
        eps_imag: Vec<f64>,
    ) -> Result<Self, MaterialError> {
        let spline_real = CubicSpline::try_new(omegas.clone(), eps_real)?;
        let spline_imag = CubicSpline::try_new(omegas, eps_imag)?;
        Ok(Self {
            name: name.into(),
            spline_real,
            spline_imag,
        })
    }

    /// Frequency range over which data is available.
    pub fn frequency_range(&self) -> (f64, f64) {
        self.spline_real.domain()
    }
}

impl MaterialModel for TabulatedMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn eps_mu(&self, omega: Complex64) -> Result<(Complex64, Complex64), MaterialError> {
        if omega.im != 0.0 {
            return Err(MaterialError::ComplexFrequency(self.name.clone()));
        }
        let (min, max) = self.frequency_range();
        if omega.re < min || omega.re > max {
            return Err(MaterialError::OutOfRange {
                omega: omega.re,
                min,
                max,
            });
        }

        let eps = Complex64::new(
            self.spline_real.evaluate(omega.re),
            self.spline_imag.evaluate(omega.re),
        );
        Ok((eps, Complex64::new(1.0, 0.0)))
    }
}
