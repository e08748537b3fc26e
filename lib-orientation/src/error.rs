use core::{error::Error as CoreError, fmt};

/// Errors reported by the [`crate::OrientationEstimator`]. None of them are fatal, the caller can
/// always retry on the next tick or retry `begin()`.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error
{
    /// The sample source could not be initialized, or `update()` was called before `begin()`
    /// succeeded.
    DeviceUnavailable,

    /// The sample source failed to produce a reading this tick, the estimate was left unchanged.
    SampleUnavailable,

    /// `update()` was called before the configured minimum update interval elapsed.
    Throttled,
}

impl CoreError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DeviceUnavailable => write!(f, "Motion sensor is not available"),
            Self::SampleUnavailable => write!(f, "No sample available from motion sensor"),
            Self::Throttled => write!(f, "Minimum update interval has not elapsed yet"),
        }
    }
}
