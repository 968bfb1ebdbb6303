//! Incident fields.
//!
//! An incident field is generated by sources lying in one region of the
//! geometry and only contributes at evaluation points in that same region.

use num_complex::Complex64;
use tessera_geometry::Region;

use crate::types::{relative_impedance, wavenumber, SixVector, ZVAC};

/// A source of incident fields.
pub trait IncidentField: Send + Sync {
    /// Region containing the sources of this field.
    fn region(&self) -> Region;

    /// Refresh frequency-dependent state. `eps` and `mu` are those of
    /// [`IncidentField::region`] at `omega`. Calling this again with the same
    /// arguments has no further effect.
    fn update(&mut self, omega: Complex64, eps: Complex64, mu: Complex64);

    /// Fields $(\mathbf{E}, \mathbf{H})$ at `x`.
    fn fields(&self, x: &[f64; 3]) -> SixVector;
}

/// Plane wave $\mathbf{E} = \mathbf{E}_0 e^{ik\hat{\mathbf{n}}\cdot\mathbf{x}}$,
/// $\mathbf{H} = \hat{\mathbf{n}}\times\mathbf{E} / (Z_0 Z_r)$.
#[derive(Debug, Clone)]
pub struct PlaneWave {
    /// Complex polarisation amplitude (V/m), perpendicular to the direction.
    pub e0: [Complex64; 3],
    /// Unit propagation direction.
    pub direction: [f64; 3],
    pub region: Region,
    k: Complex64,
    z_rel: Complex64,
}

impl PlaneWave {
    /// Plane wave in the exterior region. `direction` is normalised.
    pub fn new(e0: [Complex64; 3], direction: [f64; 3]) -> Self {
        let len = (direction[0] * direction[0]
            + direction[1] * direction[1]
            + direction[2] * direction[2])
            .sqrt();
        Self {
            e0,
            direction: [direction[0] / len, direction[1] / len, direction[2] / len],
            region: Region::Exterior,
            k: Complex64::new(0.0, 0.0),
            z_rel: Complex64::new(1.0, 0.0),
        }
    }

    /// Place the sources of this wave in `region`.
    pub fn in_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Wavenumber set by the last [`IncidentField::update`].
    pub fn wavenumber(&self) -> Complex64 {
        self.k
    }
}

impl IncidentField for PlaneWave {
    fn region(&self) -> Region {
        self.region
    }

    fn update(&mut self, omega: Complex64, eps: Complex64, mu: Complex64) {
        self.k = wavenumber(omega, eps, mu);
        self.z_rel = relative_impedance(eps, mu);
    }

    fn fields(&self, x: &[f64; 3]) -> SixVector {
        let n = &self.direction;
        let ndotx = n[0] * x[0] + n[1] * x[1] + n[2] * x[2];
        let phase = (Complex64::new(0.0, 1.0) * self.k * ndotx).exp();
        let e = [self.e0[0] * phase, self.e0[1] * phase, self.e0[2] * phase];

        let z = self.z_rel * ZVAC;
        [
            e[0],
            e[1],
            e[2],
            (n[1] * e[2] - n[2] * e[1]) / z,
            (n[2] * e[0] - n[0] * e[2]) / z,
            (n[0] * e[1] - n[1] * e[0]) / z,
        ]
    }
}
