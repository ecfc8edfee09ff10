use thiserror::Error;

use crate::mode::Region;

/// Problems with a configured mode ladder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("{0:?} region must contain at least one mode")]
    EmptyRegion(Region),

    #[error("{region:?} multiplier {multiplier} at position {position} is outside the region's range")]
    OutOfRange {
        region: Region,
        position: usize,
        multiplier: f64,
    },

    #[error("{region:?} multipliers must be strictly increasing (position {position})")]
    NotIncreasing { region: Region, position: usize },

    #[error("first warp multiplier {warp} is below the last fast-forward multiplier {fast_forward}")]
    WarpOverlapsFastForward { warp: f64, fast_forward: f64 },
}

/// A transition the host would not perform, with the reason shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct Refusal {
    pub reason: String,
}

impl Refusal {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
