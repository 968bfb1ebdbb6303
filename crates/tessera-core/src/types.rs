//! Core constants and small field-vector helpers.

use num_complex::Complex64;

/// Impedance of free space (Ω).
pub const ZVAC: f64 = 376.730_313_461;

/// Electric and magnetic field components `(Ex, Ey, Ez, Hx, Hy, Hz)`.
pub type SixVector = [Complex64; 6];

pub const ZERO_SIX: SixVector = [Complex64::new(0.0, 0.0); 6];

/// `acc += scale * other`, component-wise.
pub fn six_add_scaled(acc: &mut SixVector, scale: f64, other: &SixVector) {
    for (a, b) in acc.iter_mut().zip(other.iter()) {
        *a += *b * scale;
    }
}

/// Wavenumber $k = \omega\sqrt{\epsilon\mu}$ in a medium.
pub fn wavenumber(omega: Complex64, eps: Complex64, mu: Complex64) -> Complex64 {
    (eps * mu).sqrt() * omega
}

/// Relative wave impedance $\sqrt{\mu/\epsilon}$ of a medium.
pub fn relative_impedance(eps: Complex64, mu: Complex64) -> Complex64 {
    (mu / eps).sqrt()
}
