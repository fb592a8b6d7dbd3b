//! Two-tier grouping of measurements by (anisotropy, rounded b-value).
//!
//! Tiers are the distinct anisotropy values in ascending order. Inside each
//! tier, measurements are bucketed by rounded b-value, again ascending. The
//! result is one flat list; its order defines the output slots of the
//! powder average.

use serde::{Deserialize, Serialize};

use crate::bvals::{same_value, sorted_unique, BvalRounding};

/// Measurements sharing one (anisotropy, rounded b-value) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionGroup {
    /// Measurement indices, ascending.
    pub indices: Vec<usize>,
    /// B-tensor anisotropy shared by the members.
    pub anisotropy: f64,
    /// Rounded b-value shared by the members.
    pub bval: f64,
}

impl AcquisitionGroup {
    /// Number of measurements in the group.
    pub fn n_meas(&self) -> usize {
        self.indices.len()
    }
}

/// Partition measurements into ordered (anisotropy, b-value) groups.
///
/// `anisotropies` and `bvals` are indexed by measurement and must have equal
/// length. Anisotropy values are compared exactly; b-values are compared
/// after rounding at magnitude `bmag` with `rounding`.
pub fn group_acquisitions(
    anisotropies: &[f64],
    bvals: &[f64],
    bmag: i32,
    rounding: &dyn BvalRounding,
) -> Vec<AcquisitionGroup> {
    debug_assert_eq!(anisotropies.len(), bvals.len());

    let tiers = sorted_unique(anisotropies);
    let mut groups = Vec::new();

    for &anisotropy in &tiers {
        let tier_idxs: Vec<usize> = anisotropies
            .iter()
            .enumerate()
            .filter(|(_, &a)| same_value(a, anisotropy))
            .map(|(i, _)| i)
            .collect();
        let tier_bvals: Vec<f64> = tier_idxs.iter().map(|&i| bvals[i]).collect();
        let (unique, rounded) = rounding.unique_rounded(&tier_bvals, bmag);

        for &bval in &unique {
            let indices: Vec<usize> = tier_idxs
                .iter()
                .zip(&rounded)
                .filter(|(_, &rb)| same_value(rb, bval))
                .map(|(&i, _)| i)
                .collect();
            tracing::trace!(
                anisotropy,
                bval,
                n_meas = indices.len(),
                "powder-average group"
            );
            groups.push(AcquisitionGroup {
                indices,
                anisotropy,
                bval,
            });
        }
    }

    tracing::debug!(
        bmag,
        n_tiers = tiers.len(),
        n_groups = groups.len(),
        "grouped {} measurements",
        total_measurements(&groups)
    );
    groups
}

/// Total number of measurements covered by `groups`.
pub fn total_measurements(groups: &[AcquisitionGroup]) -> usize {
    groups.iter().map(AcquisitionGroup::n_meas).sum()
}
