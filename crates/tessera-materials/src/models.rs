//! Analytic material models.
//!
//! Dispersive models use the $e^{-i\omega t}$ time convention, so lossy media
//! have $\operatorname{Im}\epsilon > 0$ at real positive frequency.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::provider::{MaterialError, MaterialModel};

/// Perfect electric conductor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Pec;

impl MaterialModel for Pec {
    fn name(&self) -> &str {
        "PEC"
    }

    fn eps_mu(&self, _omega: Complex64) -> Result<(Complex64, Complex64), MaterialError> {
        Err(MaterialError::NotAMedium(self.name().into()))
    }

    fn is_pec(&self) -> bool {
        true
    }
}

/// Free space: $\epsilon = \mu = 1$.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vacuum;

impl MaterialModel for Vacuum {
    fn name(&self) -> &str {
        "Vacuum"
    }

    fn eps_mu(&self, _omega: Complex64) -> Result<(Complex64, Complex64), MaterialError> {
        Ok((Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)))
    }
}

/// Non-dispersive medium with fixed $\epsilon$ and $\mu$.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantEpsMu {
    pub name: String,
    pub eps: Complex64,
    pub mu: Complex64,
}

impl ConstantEpsMu {
    pub fn new(name: impl Into<String>, eps: Complex64, mu: Complex64) -> Self {
        Self {
            name: name.into(),
            eps,
            mu,
        }
    }

    /// Non-magnetic dielectric with refractive index `n`.
    pub fn dielectric(name: impl Into<String>, n: f64) -> Self {
        Self::new(name, Complex64::new(n * n, 0.0), Complex64::new(1.0, 0.0))
    }
}

impl MaterialModel for ConstantEpsMu {
    fn name(&self) -> &str {
        &self.name
    }

    fn eps_mu(&self, _omega: Complex64) -> Result<(Complex64, Complex64), MaterialError> {
        Ok((self.eps, self.mu))
    }
}

/// Drude free-electron metal:
/// $\epsilon(\omega) = \epsilon_\infty - \frac{\omega_p^2}{\omega(\omega + i\gamma)}$.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drude {
    pub name: String,
    pub eps_inf: f64,
    pub omega_p: f64,
    pub gamma: f64,
}

impl Drude {
    pub fn new(name: impl Into<String>, eps_inf: f64, omega_p: f64, gamma: f64) -> Self {
        Self {
            name: name.into(),
            eps_inf,
            omega_p,
            gamma,
        }
    }
}

impl MaterialModel for Drude {
    fn name(&self) -> &str {
        &self.name
    }

    fn eps_mu(&self, omega: Complex64) -> Result<(Complex64, Complex64), MaterialError> {
        if omega.norm() == 0.0 {
            return Err(MaterialError::DataError(format!(
                "Drude material '{}' is singular at zero frequency",
                self.name
            )));
        }
        let ig = Complex64::new(0.0, self.gamma);
        let eps = self.eps_inf - self.omega_p * self.omega_p / (omega * (omega + ig));
        Ok((eps, Complex64::new(1.0, 0.0)))
    }
}

/// Single-pole Lorentz oscillator:
/// $\epsilon(\omega) = \epsilon_\infty + \frac{\Delta\epsilon\,\omega_0^2}{\omega_0^2 - \omega^2 - i\gamma\omega}$.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lorentz {
    pub name: String,
    pub eps_inf: f64,
    pub delta_eps: f64,
    pub omega_0: f64,
    pub gamma: f64,
}

impl MaterialModel for Lorentz {
    fn name(&self) -> &str {
        &self.name
    }

    fn eps_mu(&self, omega: Complex64) -> Result<(Complex64, Complex64), MaterialError> {
        let w0_sq = self.omega_0 * self.omega_0;
        let denom = w0_sq - omega * omega - Complex64::new(0.0, self.gamma) * omega;
        if denom.norm() == 0.0 {
            return Err(MaterialError::DataError(format!(
                "Lorentz material '{}' is singular at its undamped resonance",
                self.name
            )));
        }
        let eps = self.eps_inf + self.delta_eps * w0_sq / denom;
        Ok((eps, Complex64::new(1.0, 0.0)))
    }
}
