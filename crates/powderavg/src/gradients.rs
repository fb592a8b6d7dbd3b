//! Read-only view of the acquisition parameters consumed by powder averaging.

use nalgebra::Matrix3;

use crate::btensor::btensors_to_anisotropy;

/// Anisotropy assumed for every measurement when no b-tensors are given
/// (conventional linear encoding).
pub const LINEAR_ANISOTROPY: f64 = 1.0;

/// Acquisition parameters, one entry per measurement.
///
/// Implement this for an existing gradient-table type to feed it to
/// [`PowderAverage`](crate::PowderAverage) without copying. The built-in
/// implementation is [`GradientTable`].
pub trait AcquisitionScheme {
    /// B-value of each measurement.
    fn bvals(&self) -> &[f64];
    /// B-tensor of each measurement, if the acquisition recorded them.
    fn btens(&self) -> Option<&[Matrix3<f64>]>;
}

/// Plain holder for caller-built acquisition parameters.
///
/// No validation is performed; `btens`, when present, is expected to have
/// one entry per b-value.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTable {
    /// B-value of each measurement.
    pub bvals: Vec<f64>,
    /// Optional b-tensor of each measurement; `None` means linear encoding.
    pub btens: Option<Vec<Matrix3<f64>>>,
}

impl GradientTable {
    /// Table with b-values only (linear encoding).
    pub fn new(bvals: Vec<f64>) -> Self {
        Self { bvals, btens: None }
    }

    /// Attach per-measurement b-tensors.
    pub fn with_btens(mut self, btens: Vec<Matrix3<f64>>) -> Self {
        self.btens = Some(btens);
        self
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.bvals.len()
    }

    /// True when the table holds no measurements.
    pub fn is_empty(&self) -> bool {
        self.bvals.is_empty()
    }
}

impl AcquisitionScheme for GradientTable {
    fn bvals(&self) -> &[f64] {
        &self.bvals
    }

    fn btens(&self) -> Option<&[Matrix3<f64>]> {
        self.btens.as_deref()
    }
}

/// Per-measurement anisotropy of `scheme`.
pub fn anisotropies<A: AcquisitionScheme + ?Sized>(scheme: &A) -> Vec<f64> {
    match scheme.btens() {
        Some(btens) => btensors_to_anisotropy(btens),
        None => vec![LINEAR_ANISOTROPY; scheme.bvals().len()],
    }
}
