/// Sensitivity of the accelerometer at its +/-2g full scale range, in LSB/g.
pub const DEFAULT_ACCEL_SCALE: f32 = 16384.0;

/// Sensitivity of the gyroscope at its +/-250 deg/s full scale range, in LSB/(deg/s).
pub const DEFAULT_GYRO_SCALE: f32 = 131.0;

/// Weight of the gyroscope term in the complementary filter.
pub const DEFAULT_FILTER_ALPHA: f32 = 0.98;

/// Settings for the [`crate::OrientationEstimator`], fixed for the lifetime of the estimator.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig
{
    /// Divisor converting raw accelerometer values into g.
    pub accel_scale: f32,

    /// Divisor converting raw gyroscope values into deg/s.
    pub gyro_scale: f32,

    /// Complementary filter mixing factor in `[0, 1]`, the gyroscope integrated angle gets this
    /// weight and the accelerometer angle gets the rest.
    pub filter_alpha: f32,

    /// In milliseconds; updates requested sooner than this after the last successful sample are
    /// refused without touching the sensor. Zero disables throttling.
    pub min_update_interval_ms: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            accel_scale: DEFAULT_ACCEL_SCALE,
            gyro_scale: DEFAULT_GYRO_SCALE,
            filter_alpha: DEFAULT_FILTER_ALPHA,
            min_update_interval_ms: 0,
        }
    }
}

impl EstimatorConfig {

    pub fn with_scales(mut self, accel_scale: f32, gyro_scale: f32) -> Self {
        self.accel_scale = accel_scale;
        self.gyro_scale = gyro_scale;
        self
    }

    /// Set the filter mixing factor, values outside of `[0, 1]` are clamped.
    /// 
    pub fn with_filter_alpha(mut self, alpha: f32) -> Self {
        self.filter_alpha = math::clamp(alpha, 0.0, 1.0);
        self
    }

    pub fn with_min_update_interval(mut self, interval_ms: u32) -> Self {
        self.min_update_interval_ms = interval_ms;
        self
    }

    /// Returns a copy with every setting forced into its valid range, invalid scale factors are
    /// replaced by the defaults.
    /// 
    pub fn sanitized(&self) -> Self {
        let mut config = *self;
        if !(config.accel_scale > 0.0) {
            log::warn!("Invalid accel scale {}, using {}", config.accel_scale, DEFAULT_ACCEL_SCALE);
            config.accel_scale = DEFAULT_ACCEL_SCALE;
        }
        if !(config.gyro_scale > 0.0) {
            log::warn!("Invalid gyro scale {}, using {}", config.gyro_scale, DEFAULT_GYRO_SCALE);
            config.gyro_scale = DEFAULT_GYRO_SCALE;
        }
        config.with_filter_alpha(config.filter_alpha)
    }
}
