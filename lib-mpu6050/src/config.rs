use crate::*;
use crate::dmp::DEFAULT_DMP_OUTPUT_RATE_HZ;

/// Which kind of samples the driver produces, fixed when the driver is created.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode
{
    /// Read accelerometer and gyroscope registers directly, orientation is computed on the host.
    #[default]
    Raw,

    /// Upload the given firmware image into the DMP (Digital Motion Processor) and read fused
    /// quaternions from the FIFO. The image must match the packet layout selected through the
    /// `dmp612`/`dmp20` features.
    Dmp(&'static [u8]),
}

/// How long to keep polling for the device before giving up during initialization.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy
{
    /// Number of times the device id is read, at least one attempt is always made.
    pub max_attempts: u8,

    /// In milliseconds; time between two attempts.
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { max_attempts: 10, delay_ms: 100 }
    }
}

/// Factory trim correction values written into the offset registers, in raw LSB.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offsets
{
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mpu6050Config
{
    /// i2c address that chip is located at.
    pub address: u8,

    pub accel_scale: AccelScaleRange,
    pub gyro_scale: GyroScaleRange,
    pub dlpf_mode: DLPFMode,

    /// Sample rate is `1khz / (1 + divider)` while the DLPF is enabled.
    pub sample_rate_divider: u8,

    pub mode: SampleMode,

    /// In Hz; how often the DMP writes a packet into the FIFO, only used in `SampleMode::Dmp`.
    pub dmp_output_rate_hz: u8,

    pub retry: RetryPolicy,

    /// Known offsets for this particular chip, written during initialization.
    pub offsets: Option<Offsets>,

    /// When set, the offsets are (re)computed during initialization with this many PID loops.
    /// The device has to lie flat and still while this runs.
    pub calibration_loops: Option<u8>,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Mpu6050Config {
            address: MPU6050_DEFAULT_I2C_ADDR,
            accel_scale: AccelScaleRange::default(),
            gyro_scale: GyroScaleRange::default(),
            dlpf_mode: DLPFMode::default(),
            sample_rate_divider: 4,
            mode: SampleMode::default(),
            dmp_output_rate_hz: DEFAULT_DMP_OUTPUT_RATE_HZ,
            retry: RetryPolicy::default(),
            offsets: None,
            calibration_loops: None,
        }
    }
}

impl Mpu6050Config {

    /// Accelerometer range the chip actually ends up using, the DMP firmware needs +/-2g.
    /// 
    pub fn effective_accel_scale(&self) -> AccelScaleRange {
        match self.mode {
            SampleMode::Raw => self.accel_scale,
            SampleMode::Dmp(_) => AccelScaleRange::G2,
        }
    }

    /// Gyroscope range the chip actually ends up using, the DMP firmware needs +/-2000 deg/s.
    /// 
    pub fn effective_gyro_scale(&self) -> GyroScaleRange {
        match self.mode {
            SampleMode::Raw => self.gyro_scale,
            SampleMode::Dmp(_) => GyroScaleRange::D2000,
        }
    }
}
