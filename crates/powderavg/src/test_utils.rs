//! Shared builders for synthetic acquisitions and signal volumes.

use nalgebra::{Matrix3, Vector3};
use ndarray::Array4;

/// Linear (stick) encoding: `b * u uᵀ`.
pub(crate) fn linear_btensor(b: f64, dir: Vector3<f64>) -> Matrix3<f64> {
    let u = dir.normalize();
    u * u.transpose() * b
}

/// Planar encoding: `b/2 * (I - u uᵀ)`, with `u` the plane normal.
pub(crate) fn planar_btensor(b: f64, normal: Vector3<f64>) -> Matrix3<f64> {
    let u = normal.normalize();
    (Matrix3::identity() - u * u.transpose()) * (0.5 * b)
}

/// Spherical encoding: `b/3 * I`.
pub(crate) fn spherical_btensor(b: f64) -> Matrix3<f64> {
    Matrix3::identity() * (b / 3.0)
}

/// Volume of shape `(x, y, z, n_meas)` with a distinct value per element.
pub(crate) fn ramp_volume(spatial: (usize, usize, usize), n_meas: usize) -> Array4<f64> {
    let (nx, ny, nz) = spatial;
    Array4::from_shape_fn((nx, ny, nz, n_meas), |(x, y, z, n)| {
        (((x * ny + y) * nz + z) * n_meas + n) as f64 * 0.5 + 1.0
    })
}
