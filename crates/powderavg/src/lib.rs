//! powderavg — powder averaging of diffusion MRI signal.
//!
//! Measurements that share a b-tensor anisotropy and a (rounded) b-value are
//! averaged together, removing the dependence on encoding direction. The
//! computation has two stages:
//!
//! 1. **Grouping** – measurements are partitioned into tiers by anisotropy,
//!    then into buckets by b-value rounded at magnitude `bmag`. Both levels
//!    are ordered ascending.
//! 2. **Averaging** – a 1-D `(N,)` or 4-D `(X, Y, Z, N)` signal array is
//!    reduced along its last axis to one mean per group.
//!
//! Acquisitions without b-tensors are treated as linear encoding, which
//! reduces to conventional b-value powder averaging.
//!
//! # Public API
//! - [`PowderAverage`] is the entry point: build once per acquisition,
//!   call [`PowderAverage::calculate`] per signal array
//! - [`AcquisitionScheme`] / [`GradientTable`] supply acquisition parameters
//! - [`BvalRounding`] swaps the b-value rounding policy
//!
//! Image I/O and gradient-table parsing are out of scope.

mod average;
pub mod btensor;
pub mod bvals;
mod config;
mod error;
mod gradients;
mod grouping;
#[cfg(test)]
mod test_utils;

pub use average::{reduce_groups, PowderAverage};
pub use bvals::{BvalRounding, MagnitudeRounding};
pub use config::PowderAverageConfig;
pub use error::PowderAverageError;
pub use gradients::{anisotropies, AcquisitionScheme, GradientTable, LINEAR_ANISOTROPY};
pub use grouping::{group_acquisitions, total_measurements, AcquisitionGroup};
