//! Powder averaging of 1-D (single voxel) or 4-D (volume) signal.

use ndarray::{ArrayBase, ArrayD, ArrayView1, Axis, Data, Dimension, IxDyn};

use crate::bvals::{default_bmag, BvalRounding, MagnitudeRounding};
use crate::config::PowderAverageConfig;
use crate::error::PowderAverageError;
use crate::gradients::{anisotropies, AcquisitionScheme};
use crate::grouping::{group_acquisitions, total_measurements, AcquisitionGroup};

/// Powder averager for one acquisition.
///
/// Grouping is computed once from the acquisition parameters; the instance
/// is immutable afterwards and can be shared across threads to average many
/// signal arrays.
///
/// # Examples
///
/// ```
/// use ndarray::arr1;
/// use powderavg::{GradientTable, PowderAverage};
///
/// let table = GradientTable::new(vec![0.0, 0.0, 1000.0, 1005.0, 2000.0]);
/// let pa = PowderAverage::new(&table);
/// assert_eq!(pa.n_groups(), 3);
///
/// let averaged = pa.calculate(&arr1(&[1.0, 3.0, 5.0, 7.0, 9.0])).unwrap();
/// assert_eq!(averaged.as_slice().unwrap(), &[2.0, 6.0, 9.0]);
/// ```
#[derive(Debug, Clone)]
pub struct PowderAverage {
    bmag: i32,
    n_measurements: usize,
    groups: Vec<AcquisitionGroup>,
}

impl PowderAverage {
    /// Build with default configuration (b-value magnitude derived from the
    /// largest b-value).
    pub fn new<A: AcquisitionScheme + ?Sized>(scheme: &A) -> Self {
        Self::with_config(scheme, &PowderAverageConfig::default())
    }

    /// Build with an explicit configuration.
    pub fn with_config<A: AcquisitionScheme + ?Sized>(
        scheme: &A,
        config: &PowderAverageConfig,
    ) -> Self {
        Self::with_rounding(scheme, config, &MagnitudeRounding)
    }

    /// Build with a custom b-value rounding policy.
    pub fn with_rounding<A: AcquisitionScheme + ?Sized>(
        scheme: &A,
        config: &PowderAverageConfig,
        rounding: &dyn BvalRounding,
    ) -> Self {
        let bvals = scheme.bvals();
        // One magnitude for the whole acquisition, not per anisotropy tier.
        let bmag = config.bmag.unwrap_or_else(|| default_bmag(bvals));
        let groups = group_acquisitions(&anisotropies(scheme), bvals, bmag, rounding);

        Self {
            bmag,
            n_measurements: bvals.len(),
            groups,
        }
    }

    /// Resolved b-value rounding magnitude.
    pub fn bmag(&self) -> i32 {
        self.bmag
    }

    /// Number of measurements in the source acquisition.
    pub fn n_measurements(&self) -> usize {
        self.n_measurements
    }

    /// Ordered groups; output slot `i` of [`calculate`](Self::calculate)
    /// corresponds to `groups()[i]`.
    pub fn groups(&self) -> &[AcquisitionGroup] {
        &self.groups
    }

    /// Number of output slots.
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Member count of each group.
    pub fn n_meas(&self) -> Vec<usize> {
        self.groups.iter().map(AcquisitionGroup::n_meas).collect()
    }

    /// Rounded b-value of each group.
    pub fn bvals(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.bval).collect()
    }

    /// Anisotropy of each group.
    pub fn anisotropies(&self) -> Vec<f64> {
        self.groups.iter().map(|g| g.anisotropy).collect()
    }

    /// Powder-average `data`.
    ///
    /// `data` is either a single voxel of shape `(N,)` or a volume of shape
    /// `(X, Y, Z, N)`, with `N` the number of measurements. The result has
    /// shape `(G,)` or `(X, Y, Z, G)` with `G = n_groups()`.
    pub fn calculate<S, D>(
        &self,
        data: &ArrayBase<S, D>,
    ) -> Result<ArrayD<f64>, PowderAverageError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        reduce_groups(data, &self.groups)
    }
}

/// Mean of `data` over each group's indices along the last axis.
///
/// Accepts 1-D or 4-D input; any other rank is rejected with
/// [`PowderAverageError::InvalidShape`]. Indices outside the last axis panic.
pub fn reduce_groups<S, D>(
    data: &ArrayBase<S, D>,
    groups: &[AcquisitionGroup],
) -> Result<ArrayD<f64>, PowderAverageError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let ndim = data.ndim();
    if ndim != 1 && ndim != 4 {
        tracing::warn!(ndim, "rejecting signal array for powder average");
        return Err(PowderAverageError::InvalidShape { ndim });
    }
    tracing::trace!(shape = ?data.shape(), n_groups = groups.len(), "powder average");
    debug_assert!(total_measurements(groups) <= data.shape()[ndim - 1]);

    let axis = Axis(ndim - 1);
    let mut out_shape = data.shape().to_vec();
    out_shape[ndim - 1] = groups.len();
    let mut out = ArrayD::<f64>::zeros(IxDyn(&out_shape));

    // 1-D input is a single lane.
    for (signal, mut averaged) in data.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        for (slot, group) in averaged.iter_mut().zip(groups) {
            *slot = lane_mean(&signal, &group.indices);
        }
    }
    Ok(out)
}

#[inline]
fn lane_mean(signal: &ArrayView1<'_, f64>, indices: &[usize]) -> f64 {
    let sum: f64 = indices.iter().map(|&i| signal[i]).sum();
    sum / indices.len() as f64
}
