use crate::*;

/// One raw 6-axis reading, exactly as the sensor registers report it.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample
{
    /// Accelerometer x, y, z in LSB.
    pub accel: [i16; 3],

    /// Gyroscope x, y, z in LSB.
    pub gyro: [i16; 3],
}

impl RawSample {
    pub const fn new(accel: [i16; 3], gyro: [i16; 3]) -> Self {
        RawSample { accel, gyro }
    }
}

/// What a sample source produces on each pull, depending on how the source was configured.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample
{
    /// Plain register reading, orientation has to be computed by the estimator.
    Raw(RawSample),

    /// Reading from a sensor that runs its own fusion (e.g. the MPU6050's DMP), the quaternion is
    /// taken as the orientation.
    Fused {
        raw: RawSample,
        quaternion: Quaternion,
    },
}

impl Sample {
    #[inline]
    pub fn raw(&self) -> &RawSample {
        match self {
            Sample::Raw(raw) => raw,
            Sample::Fused { raw, .. } => raw,
        }
    }
}

impl From<RawSample> for Sample {
    fn from(raw: RawSample) -> Self {
        Sample::Raw(raw)
    }
}
