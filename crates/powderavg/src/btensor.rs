//! B-tensor anisotropy (b-delta).
//!
//! Eigenvalues are assigned with the Haeberlen convention: `λzz` is the
//! eigenvalue farthest from the isotropic mean `b/3`, and `λxx`, `λyy` are
//! the remaining two. Then
//!
//! ```text
//! b      = λxx + λyy + λzz
//! bdelta = (λzz - (λxx + λyy) / 2) / b
//! ```
//!
//! Linear encoding gives `1`, planar gives `-0.5`, spherical gives `0`.

use nalgebra::{Matrix3, SymmetricEigen};

/// Decimal places kept in the anisotropy so equal shapes compare exactly.
pub const ANISOTROPY_DECIMALS: i32 = 3;

/// Trace below which a b-tensor counts as b=0.
pub const ZERO_TRACE_TOLERANCE: f64 = 1e-6;

/// Anisotropy and b-value of a single b-tensor, as `(bdelta, bval)`.
///
/// A tensor with trace within [`ZERO_TRACE_TOLERANCE`] of zero has no
/// defined shape and is reported as isotropic (`bdelta = 0`).
pub fn btensor_to_bdelta(btensor: &Matrix3<f64>) -> (f64, f64) {
    let eigenvalues = SymmetricEigen::new(*btensor).eigenvalues;
    let bval: f64 = eigenvalues.iter().sum();
    if bval.abs() <= ZERO_TRACE_TOLERANCE {
        return (0.0, bval);
    }

    let b_iso = bval / 3.0;
    let mut lambdas = [eigenvalues[0], eigenvalues[1], eigenvalues[2]];
    lambdas.sort_by(|x, y| (y - b_iso).abs().total_cmp(&(x - b_iso).abs()));
    let [zz, xx, yy] = lambdas;

    let bdelta = (zz - 0.5 * (xx + yy)) / bval;
    (round_anisotropy(bdelta), bval)
}

/// Anisotropy for each b-tensor in `btens`.
pub fn btensors_to_anisotropy(btens: &[Matrix3<f64>]) -> Vec<f64> {
    btens.iter().map(|bt| btensor_to_bdelta(bt).0).collect()
}

fn round_anisotropy(bdelta: f64) -> f64 {
    let scale = 10f64.powi(ANISOTROPY_DECIMALS);
    let rounded = (bdelta * scale).round_ties_even() / scale;
    // -0.0 -> 0.0
    rounded + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{linear_btensor, planar_btensor, spherical_btensor};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn reference_shapes_have_expected_bdelta() {
        let dir = Vector3::new(1.0, 2.0, -0.5);
        let (lin, b_lin) = btensor_to_bdelta(&linear_btensor(1000.0, dir));
        let (pla, b_pla) = btensor_to_bdelta(&planar_btensor(2000.0, dir));
        let (sph, b_sph) = btensor_to_bdelta(&spherical_btensor(1500.0));

        assert_eq!(lin, 1.0);
        assert_eq!(pla, -0.5);
        assert_eq!(sph, 0.0);
        assert_relative_eq!(b_lin, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(b_pla, 2000.0, max_relative = 1e-12);
        assert_relative_eq!(b_sph, 1500.0, max_relative = 1e-12);
    }

    #[test]
    fn cigar_tensor_is_half_anisotropic() {
        let u = Vector3::new(0.0, 0.0, 1.0);
        let b = 600.0;
        let bt = (Matrix3::identity() + 3.0 * u * u.transpose()) * (b / 6.0);
        assert_eq!(btensor_to_bdelta(&bt).0, 0.5);
    }

    #[test]
    fn zero_tensor_is_isotropic() {
        assert_eq!(btensor_to_bdelta(&Matrix3::zeros()), (0.0, 0.0));
    }

    #[test]
    fn noisy_b0_tensor_is_isotropic() {
        let dir = Vector3::new(0.3, -0.2, 0.9);
        let noise = Matrix3::new(
            3e-10, 1e-11, 0.0,
            1e-11, -2e-10, 0.0,
            0.0, 0.0, 0.0,
        );
        let (lin, _) = btensor_to_bdelta(&(linear_btensor(1e-9, dir) + noise));
        let (pla, _) = btensor_to_bdelta(&(planar_btensor(0.0, dir) + noise));
        assert_eq!(lin, 0.0);
        assert_eq!(pla, 0.0);
    }

    #[test]
    fn small_but_real_bval_keeps_its_shape() {
        let dir = Vector3::z();
        assert_eq!(btensor_to_bdelta(&linear_btensor(1e-3, dir)).0, 1.0);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let bdelta = btensor_to_bdelta(&spherical_btensor(1000.0)).0;
        assert!(bdelta.is_sign_positive());
    }

    #[test]
    fn batch_conversion_keeps_order() {
        let dir = Vector3::x();
        let btens = [
            spherical_btensor(500.0),
            linear_btensor(1000.0, dir),
            planar_btensor(1000.0, dir),
        ];
        assert_eq!(btensors_to_anisotropy(&btens), vec![0.0, 1.0, -0.5]);
    }
}
