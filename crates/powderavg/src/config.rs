//! Construction-time configuration for powder averaging.

use serde::{Deserialize, Serialize};

/// Configuration for [`PowderAverage`](crate::PowderAverage) construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowderAverageConfig {
    /// Order of magnitude at which two b-values are considered equal.
    ///
    /// `None` derives it from the largest b-value of the whole acquisition:
    /// `floor(log10(max_bval)) - 1`. The same value is shared by every
    /// anisotropy tier. Values above `f64::MAX_10_EXP` (308) behave like 308
    /// and round every b-value to zero.
    pub bmag: Option<i32>,
}

impl PowderAverageConfig {
    /// Config with a fixed rounding magnitude.
    pub fn with_bmag(bmag: i32) -> Self {
        Self { bmag: Some(bmag) }
    }
}
