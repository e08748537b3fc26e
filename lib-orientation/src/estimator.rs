use math::*;
use crate::*;
use cfg_if::cfg_if;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorState
{
    /// `begin()` has not succeeded yet, updates are refused.
    Uninitialized,

    /// Sample source is up, every `update()` advances the estimate.
    Ready,
}

/// Latest output of the estimator.
///
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationEstimate
{
    /// In degrees; yaw is integrated without any correction so it drifts without bound.
    pub angles: EulerAngles,

    /// In g; acceleration of the most recent sample.
    pub accel: Vector,

    /// In deg/s; angular rate of the most recent sample.
    pub gyro: Vector,

    /// In seconds; time between the most recent sample and the one before it.
    pub dt: f32,
}

/// Estimates yaw/pitch/roll from a 6-axis motion sensor with a complementary filter. Pitch and
/// roll mix the integrated gyroscope rate with the tilt implied by gravity, yaw is only integrated
/// since there is no absolute heading reference.
///
/// The estimator is driven by calling [`OrientationEstimator::update`] periodically, it pulls
/// exactly one sample per call from its source.
///
pub struct OrientationEstimator<S, C>
{
    source: S,
    clock: C,
    config: EstimatorConfig,
    state: EstimatorState,

    /// In milliseconds; timestamp of the last successfully processed sample.
    last_sample_time: u64,

    estimate: OrientationEstimate,

    /// Pitch and roll according only to the accelerometer's gravity vector.
    #[cfg(feature = "debug")]
    pub accel_angles: EulerAngles,

    /// Orientation according only to integrating the gyroscope, ignoring the accelerometer.
    #[cfg(feature = "debug")]
    pub gyro_angles: EulerAngles,
}

impl<S: RawSampleSource, C: Clock> OrientationEstimator<S, C> {

    pub fn new(source: S, clock: C, config: EstimatorConfig) -> Self {
        OrientationEstimator {
            source,
            clock,
            config: config.sanitized(),
            state: EstimatorState::Uninitialized,
            last_sample_time: 0,
            estimate: OrientationEstimate::default(),
            #[cfg(feature = "debug")]
            accel_angles: EulerAngles::identity(),
            #[cfg(feature = "debug")]
            gyro_angles: EulerAngles::identity(),
        }
    }

    /// Initializes the sample source and starts the clock for the first `dt`. Can be called again
    /// after a failure.
    ///
    pub fn begin(&mut self) -> Result<(), Error> {
        if let Err(err) = self.source.initialize() {
            log::error!("Failed to initialize motion sensor: {:?}", err);
            return Err(Error::DeviceUnavailable);
        }
        self.last_sample_time = self.clock.now_ms();
        self.state = EstimatorState::Ready;
        log::info!("Orientation estimator ready at t={}ms", self.last_sample_time);
        Ok(())
    }

    /// Pull one sample from the source and advance the estimate. When no sample could be read the
    /// previous estimate is kept and the time of the last sample is not moved, so the next `dt`
    /// spans the whole gap.
    ///
    pub fn update(&mut self) -> Result<OrientationEstimate, Error> {
        if self.state != EstimatorState::Ready {
            return Err(Error::DeviceUnavailable);
        }

        let now = self.clock.now_ms();
        let elapsed = now.checked_sub(self.last_sample_time);
        if let Some(elapsed) = elapsed {
            if elapsed < self.config.min_update_interval_ms as u64 {
                return Err(Error::Throttled);
            }
        }

        let sample = self.source.read_raw().map_err(|err| {
            log::warn!("Skipping update, could not read sample: {:?}", err);
            Error::SampleUnavailable
        })?;

        let raw = sample.raw();
        let accel = Vector::from_raw(raw.accel, self.config.accel_scale);
        let gyro = Vector::from_raw(raw.gyro, self.config.gyro_scale);

        // How much time has passed since the previous sample?
        let dt = match elapsed {
            Some(ms) => ms as f32 / 1000.0,
            None => {
                log::warn!("Clock went backwards ({}ms -> {}ms), using dt=0", self.last_sample_time, now);
                0.0
            }
        };
        self.last_sample_time = now;

        let angles = match sample {
            Sample::Raw(_) => self.fuse(&accel, &gyro, dt),
            Sample::Fused { quaternion, .. } => EulerAngles::from(quaternion.normalize()).to_degrees(),
        };

        self.estimate = OrientationEstimate { angles, accel, gyro, dt };
        Ok(self.estimate)
    }

    /// Complementary filter step for pitch and roll, pure integration for yaw.
    ///
    fn fuse(&mut self, accel: &Vector, gyro: &Vector, dt: f32) -> EulerAngles {
        let previous = self.estimate.angles;
        let alpha = self.config.filter_alpha;

        let (accel_pitch, accel_roll) = accel_tilt(accel);

        cfg_if!{ if #[cfg(feature = "debug")] {
            self.accel_angles = EulerAngles::new(0.0, accel_pitch, accel_roll);
            self.gyro_angles = EulerAngles::new(
                self.gyro_angles.yaw + gyro.z * dt,
                self.gyro_angles.pitch + gyro.y * dt,
                self.gyro_angles.roll + gyro.x * dt,
            );
        }}

        EulerAngles {
            yaw: previous.yaw + gyro.z * dt,
            pitch: complementary_filter(alpha, previous.pitch, gyro.y, dt, accel_pitch),
            roll: complementary_filter(alpha, previous.roll, gyro.x, dt, accel_roll),
        }
    }
}

impl<S, C> OrientationEstimator<S, C> {

    #[inline]
    pub fn state(&self) -> EstimatorState {
        self.state
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == EstimatorState::Ready
    }

    #[inline]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    #[inline]
    pub fn estimate(&self) -> &OrientationEstimate {
        &self.estimate
    }

    /// In degrees.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.estimate.angles.yaw
    }

    /// In degrees.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.estimate.angles.pitch
    }

    /// In degrees.
    #[inline]
    pub fn roll(&self) -> f32 {
        self.estimate.angles.roll
    }

    #[inline]
    pub fn ax(&self) -> f32 {
        self.estimate.accel.x
    }

    #[inline]
    pub fn ay(&self) -> f32 {
        self.estimate.accel.y
    }

    #[inline]
    pub fn az(&self) -> f32 {
        self.estimate.accel.z
    }

    #[inline]
    pub fn gx(&self) -> f32 {
        self.estimate.gyro.x
    }

    #[inline]
    pub fn gy(&self) -> f32 {
        self.estimate.gyro.y
    }

    #[inline]
    pub fn gz(&self) -> f32 {
        self.estimate.gyro.z
    }

    /// In seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.estimate.dt
    }

    /// In milliseconds.
    #[inline]
    pub fn last_sample_time(&self) -> u64 {
        self.last_sample_time
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the sample source, e.g. to feed a replay source. Reconfiguring a live
    /// sensor through this reference is the caller's responsibility.
    ///
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
