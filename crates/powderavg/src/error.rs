/// Errors returned by powder averaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowderAverageError {
    /// Signal array must be 1-D (one voxel) or 4-D (volume).
    InvalidShape {
        /// Rank of the rejected array.
        ndim: usize,
    },
}

impl std::fmt::Display for PowderAverageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShape { ndim } => {
                write!(f, "signal should have 1 or 4 dimensions, got {}", ndim)
            }
        }
    }
}

impl std::error::Error for PowderAverageError {}
