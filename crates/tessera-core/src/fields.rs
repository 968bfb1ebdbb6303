//! Superposition of basis-function fields at a single point.
//!
//! Each surface radiates into the two regions it bounds. Seen from its own
//! interior the equivalent currents enter with sign −1, seen from the region
//! it sits in they enter with sign +1, and from anywhere else it contributes
//! nothing:
//!
//! $$
//! \mathbf{E} \mathrel{+}= Z_0\Big[K_\alpha\big(i\omega\mu\,\mathbf{a} - \tfrac{\nabla p}{i\omega\epsilon}\big)
//!     + N_\alpha\,\nabla\times\mathbf{a}\Big],
//! \qquad
//! \mathbf{H} \mathrel{+}= -N_\alpha\big(i\omega\epsilon\,\mathbf{a} - \tfrac{\nabla p}{i\omega\mu}\big)
//!     + K_\alpha\,\nabla\times\mathbf{a}.
//! $$

use num_complex::Complex64;
use tessera_geometry::{Geometry, Region, Surface};

use crate::coefficients::CoefficientVector;
use crate::periodic::PeriodicKernel;
use crate::potentials::{reduced_potentials, KernelContext};
use crate::types::{wavenumber, SixVector, ZERO_SIX, ZVAC};

/// Sign with which `surface`'s currents enter the field in `region`, or
/// `None` if the surface does not bound `region`.
pub fn contribution_sign(surface: &Surface, region: Region) -> Option<f64> {
    if region == surface.interior_region() {
        Some(-1.0)
    } else if region == surface.outer_region() {
        Some(1.0)
    } else {
        None
    }
}

/// Frequency, Bloch vector and kernel shared by every point of one
/// evaluation.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    pub geometry: &'a Geometry,
    pub kernel: &'a dyn PeriodicKernel,
    pub omega: Complex64,
    pub bloch: [f64; 3],
    pub exclude_inner_cells: bool,
}

impl FieldContext<'_> {
    /// Scattered $(\mathbf{E}, \mathbf{H})$ at `x`, a point in `region` whose
    /// medium has relative `eps` and `mu`.
    pub fn scattered_fields(
        &self,
        x: &[f64; 3],
        region: Region,
        coefficients: &CoefficientVector,
        eps: Complex64,
        mu: Complex64,
    ) -> SixVector {
        let i = Complex64::i();
        let iwe = i * self.omega * eps;
        let iwu = i * self.omega * mu;
        let kernel = KernelContext {
            kernel: self.kernel,
            k: wavenumber(self.omega, eps, mu),
            bloch: self.bloch,
            lattice: self.geometry.lattice(),
            exclude_inner_cells: self.exclude_inner_cells,
        };

        let mut eh = ZERO_SIX;
        for surface in self.geometry.surfaces() {
            let Some(sign) = contribution_sign(surface, region) else {
                log::trace!("surface '{}' does not bound {:?}", surface.label, region);
                continue;
            };

            for edge in 0..surface.num_edges() {
                let amps = coefficients
                    .amplitudes(self.geometry, surface.index, edge)
                    .scaled(sign);
                let k_alpha = amps.k_alpha;
                let n_alpha = amps.n_alpha.unwrap_or_default();

                let rp = reduced_potentials(self.geometry, surface.index, edge, x, &kernel);
                for mu_ in 0..3 {
                    let (a, curl, grad) = (rp.a[mu_], rp.curl_a[mu_], rp.grad_p[mu_]);
                    eh[mu_] += ZVAC * (k_alpha * (iwu * a - grad / iwe) + n_alpha * curl);
                    eh[mu_ + 3] += -n_alpha * (iwe * a - grad / iwu) + k_alpha * curl;
                }
            }
        }
        eh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periodic::FreeSpaceKernel;
    use crate::testing::{mirrored_pair_geometry, nested_geometry, pair_spec, pair_vertices};
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use tessera_geometry::Lattice;
    use tessera_materials::ConstantEpsMu;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn context(geometry: &Geometry) -> FieldContext<'_> {
        FieldContext {
            geometry,
            kernel: &FreeSpaceKernel,
            omega: c(0.7, 0.0),
            bloch: [0.0; 3],
            exclude_inner_cells: false,
        }
    }

    #[test]
    fn test_contribution_sign_follows_containment() {
        let g = nested_geometry();
        let [shell, plate, core] = [g.surface(0), g.surface(1), g.surface(2)];

        assert_eq!(contribution_sign(shell, Region::Exterior), Some(1.0));
        assert_eq!(contribution_sign(shell, Region::Interior(0)), Some(-1.0));
        assert_eq!(contribution_sign(plate, Region::Exterior), Some(1.0));
        assert_eq!(contribution_sign(plate, Region::Interior(0)), None);
        assert_eq!(contribution_sign(core, Region::Exterior), None);
        assert_eq!(contribution_sign(core, Region::Interior(0)), Some(1.0));
        assert_eq!(contribution_sign(core, Region::Interior(2)), Some(-1.0));
    }

    #[test]
    fn test_inner_and_outer_views_differ_only_in_sign() {
        let g = mirrored_pair_geometry();
        let ctx = context(&g);
        let kn = CoefficientVector::new(vec![c(0.4, -1.1)]);
        let x = [0.2, 0.7, 1.3];
        let one = c(1.0, 0.0);

        let outside = ctx.scattered_fields(&x, Region::Exterior, &kn, one, one);
        let inside = ctx.scattered_fields(&x, Region::Interior(0), &kn, one, one);
        for (o, i) in outside.iter().zip(inside.iter()) {
            assert!(o.norm() > 0.0);
            assert_relative_eq!((o + i).norm(), 0.0, epsilon = 1e-12 * o.norm());
        }
    }

    #[test]
    fn test_zero_coefficients_give_exact_zero() {
        let g = nested_geometry();
        let ctx = context(&g);
        let kn = CoefficientVector::zeros(g.total_dof());
        let one = c(1.0, 0.0);
        let eh = ctx.scattered_fields(&[0.1, 2.0, 3.0], Region::Exterior, &kn, one, one);
        assert!(eh.iter().all(|v| *v == Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_fields_are_linear_in_coefficients() {
        let g = nested_geometry();
        let ctx = context(&g);
        let n = g.total_dof();
        let k1 = CoefficientVector::new((0..n).map(|i| c(1.0 + i as f64, 0.5)).collect());
        let k2 = CoefficientVector::new((0..n).map(|i| c(-0.3, i as f64)).collect());
        let alpha = c(0.8, -2.0);
        let x = [0.4, -1.0, 2.5];
        let one = c(1.0, 0.0);

        let f1 = ctx.scattered_fields(&x, Region::Exterior, &k1, one, one);
        let f2 = ctx.scattered_fields(&x, Region::Exterior, &k2, one, one);
        let combined = ctx.scattered_fields(&x, Region::Exterior, &k1.axpy(alpha, &k2), one, one);
        for i in 0..6 {
            let expected = alpha * f1[i] + f2[i];
            let tol = 1e-10 * expected.norm();
            assert_relative_eq!((combined[i] - expected).norm(), 0.0, epsilon = tol);
        }
    }

    #[test]
    fn test_only_bounding_surfaces_contribute() {
        // Inside the shell only the shell (−1) and the core (+1) radiate, so
        // zeroing the plate's amplitude changes nothing.
        let g = nested_geometry();
        let ctx = context(&g);
        let glass = c(2.25, 0.0);
        let one = c(1.0, 0.0);
        let x = [0.5, 0.5, 0.5];

        let all = CoefficientVector::new(vec![one; g.total_dof()]);
        let mut no_plate = all.clone();
        no_plate.as_mut_slice()[g.offset(1)] = c(0.0, 0.0);

        let a = ctx.scattered_fields(&x, Region::Interior(0), &all, glass, one);
        let b = ctx.scattered_fields(&x, Region::Interior(0), &no_plate, glass, one);
        assert_eq!(a, b);

        let outside_all = ctx.scattered_fields(&x, Region::Exterior, &all, one, one);
        let outside_no_plate = ctx.scattered_fields(&x, Region::Exterior, &no_plate, one, one);
        assert_ne!(outside_all, outside_no_plate);
    }

    #[test]
    fn test_magnetic_current_is_dual_to_electric_current() {
        // In vacuum, swapping K -> N maps (E, H) to (Z0 H, -E / Z0).
        let glass = Arc::new(ConstantEpsMu::dielectric("glass", 1.5));
        let g = Geometry::new(
            pair_vertices([0.0; 3]),
            vec![pair_spec("pair", glass, None, 0)],
            Lattice::none(),
        )
        .unwrap();
        assert_eq!(g.total_dof(), 2);

        let ctx = context(&g);
        let one = c(1.0, 0.0);
        let electric = CoefficientVector::new(vec![one, c(0.0, 0.0)]);
        let magnetic = CoefficientVector::new(vec![c(0.0, 0.0), one]);

        for x in [[0.2, 0.7, 1.3], [-1.5, 0.4, 0.6], [3.0, -2.0, -4.0]] {
            let ek = ctx.scattered_fields(&x, Region::Exterior, &electric, one, one);
            let en = ctx.scattered_fields(&x, Region::Exterior, &magnetic, one, one);
            for i in 0..3 {
                assert!(ek[i].norm() > 0.0 || ek[i + 3].norm() > 0.0);
                let e_expected = ek[i + 3] * ZVAC;
                let h_expected = -ek[i] / ZVAC;
                let e_tol = 1e-12 * (1.0 + e_expected.norm());
                let h_tol = 1e-12 * (1.0 + h_expected.norm());
                assert_relative_eq!((en[i] - e_expected).norm(), 0.0, epsilon = e_tol);
                assert_relative_eq!((en[i + 3] - h_expected).norm(), 0.0, epsilon = h_tol);
            }
        }
    }
}
