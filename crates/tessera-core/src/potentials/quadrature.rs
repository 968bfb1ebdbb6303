//! Fixed 25-point triangle quadrature.
//!
//! The rule is the conical (collapsed) product of two 5-point Gauss-Legendre
//! rules: the unit square $[0,1]^2 \ni (u, v)$ is mapped onto the reference
//! triangle by $s = u$, $t = (1-u)v$, with Jacobian $(1-u)$. All weights are
//! positive and the rule is exact for polynomials of total degree ≤ 8.

use num_complex::Complex64;

/// Number of quadrature points per triangle.
pub const NUM_POINTS: usize = 25;

const GL5_X: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];

const GL5_W: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Points `(s, t, w)` on the reference triangle (0,0), (1,0), (0,1). The
/// weights sum to ½, the reference area.
pub fn reference_rule() -> [(f64, f64, f64); NUM_POINTS] {
    let mut rule = [(0.0, 0.0, 0.0); NUM_POINTS];
    for i in 0..5 {
        let u = 0.5 * (1.0 + GL5_X[i]);
        for j in 0..5 {
            let v = 0.5 * (1.0 + GL5_X[j]);
            rule[5 * i + j] = (u, (1.0 - u) * v, 0.25 * GL5_W[i] * GL5_W[j] * (1.0 - u));
        }
    }
    rule
}

/// Integrate a vector-valued function over the triangle `(a, b, c)`.
///
/// The sample point is $X = a + s(b-a) + t(c-a)$ and the weights are scaled
/// by twice the triangle area.
pub fn integrate_triangle<const N: usize, F>(
    a: &[f64; 3],
    b: &[f64; 3],
    c: &[f64; 3],
    mut f: F,
) -> [Complex64; N]
where
    F: FnMut(&[f64; 3]) -> [Complex64; N],
{
    let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        ab[1] * ac[2] - ab[2] * ac[1],
        ab[2] * ac[0] - ab[0] * ac[2],
        ab[0] * ac[1] - ab[1] * ac[0],
    ];
    let jacobian = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();

    let mut sum = [Complex64::new(0.0, 0.0); N];
    for (s, t, w) in reference_rule() {
        let x = [
            a[0] + s * ab[0] + t * ac[0],
            a[1] + s * ab[1] + t * ac[1],
            a[2] + s * ab[2] + t * ac[2],
        ];
        let values = f(&x);
        for (acc, v) in sum.iter_mut().zip(values.iter()) {
            *acc += *v * (w * jacobian);
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn factorial(n: u32) -> f64 {
        (1..=n).map(f64::from).product()
    }

    #[test]
    fn test_weights_sum_to_reference_area() {
        let total: f64 = reference_rule().iter().map(|&(_, _, w)| w).sum();
        assert_abs_diff_eq!(total, 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_monomials_integrated_exactly() {
        // ∫ s^a t^b over the reference triangle = a! b! / (a + b + 2)!
        let rule = reference_rule();
        for a in 0..=8u32 {
            for b in 0..=(8 - a) {
                let q: f64 = rule
                    .iter()
                    .map(|&(s, t, w)| w * s.powi(a as i32) * t.powi(b as i32))
                    .sum();
                let exact = factorial(a) * factorial(b) / factorial(a + b + 2);
                assert_abs_diff_eq!(q, exact, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_physical_triangle_area_and_centroid() {
        let a = [1.0, 0.0, 2.0];
        let b = [3.0, 0.0, 2.0];
        let c = [1.0, 4.0, 2.0];
        let [area, mx, my] = integrate_triangle(&a, &b, &c, |x| {
            [
                Complex64::new(1.0, 0.0),
                Complex64::new(x[0], 0.0),
                Complex64::new(0.0, x[1]),
            ]
        });
        assert_abs_diff_eq!(area.re, 4.0, epsilon = 1e-13);
        // centroid (5/3, 4/3) times area
        assert_abs_diff_eq!(mx.re, 4.0 * 5.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(my.im, 4.0 * 4.0 / 3.0, epsilon = 1e-12);
    }
}
