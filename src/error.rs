//! Startup configuration errors
//!
//! Everything here is fatal: a bad configuration stops the game before it ever
//! reaches the setup screen.

use thiserror::Error;

use crate::sim::JobId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("display geometry {width}x{height} has a zero dimension")]
    EmptyDisplay { width: u8, height: u8 },
    #[error("display width {width} cannot fit the {min}-column text screens")]
    DisplayTooNarrow { width: u8, min: u8 },
    #[error("driver interval must be at least 1 ms")]
    ZeroDriverInterval,
    #[error("move interval floor must be at least 1 ms")]
    ZeroMoveIntervalFloor,
    #[error("move interval floor {floor} ms is above the initial interval {initial} ms")]
    FloorAboveInitial { floor: u64, initial: u64 },
    #[error("{field} = {value} is not a probability in [0, 1]")]
    BadProbability { field: &'static str, value: f32 },
    #[error("max catch-up ticks must be at least 1")]
    ZeroCatchup,
    #[error("job {0:?} has an interval multiple of zero")]
    ZeroJobInterval(JobId),
    #[error("job {0:?} is registered twice")]
    DuplicateJob(JobId),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
