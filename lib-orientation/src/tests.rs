use std::cell::Cell;
use std::collections::VecDeque;

use crate::*;

/// Raw reading of a sensor lying flat and perfectly still.
const LEVEL: RawSample = RawSample::new([0, 0, 16384], [0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FakeError {
    NotConnected,
    Empty,
}

/// Sample source that hands out pre-programmed readings.
#[derive(Default)]
struct FakeSource {
    fail_initialize: bool,
    initialize_calls: usize,
    samples: VecDeque<Result<Sample, FakeError>>,
}

impl FakeSource {
    fn push(&mut self, raw: RawSample) {
        self.samples.push_back(Ok(Sample::Raw(raw)));
    }

    fn push_failure(&mut self) {
        self.samples.push_back(Err(FakeError::NotConnected));
    }
}

impl RawSampleSource for FakeSource {
    type Error = FakeError;

    fn initialize(&mut self) -> Result<(), FakeError> {
        self.initialize_calls += 1;
        if self.fail_initialize {
            return Err(FakeError::NotConnected);
        }
        Ok(())
    }

    fn read_raw(&mut self) -> Result<Sample, FakeError> {
        self.samples.pop_front().unwrap_or(Err(FakeError::Empty))
    }
}

fn ready_estimator(clock: &Cell<u64>, config: EstimatorConfig) -> OrientationEstimator<FakeSource, &Cell<u64>> {
    let mut estimator = OrientationEstimator::new(FakeSource::default(), clock, config);
    estimator.begin().unwrap();
    estimator
}

/// Feeds `raw` once every `step_ms` milliseconds, `ticks` times.
fn run(estimator: &mut OrientationEstimator<FakeSource, &Cell<u64>>, clock: &Cell<u64>, raw: RawSample, ticks: usize, step_ms: u64) {
    for _ in 0..ticks {
        clock.set(clock.get() + step_ms);
        estimator.source_mut().push(raw);
        estimator.update().unwrap();
    }
}

#[test]
fn unit_conversion_is_exact() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    run(&mut estimator, &clock, RawSample::new([16384, -16384, 16384], [131, -131, 262]), 1, 10);

    assert_eq!(estimator.ax(), 1.0);
    assert_eq!(estimator.ay(), -1.0);
    assert_eq!(estimator.az(), 1.0);
    assert_eq!(estimator.gx(), 1.0);
    assert_eq!(estimator.gy(), -1.0);
    assert_eq!(estimator.gz(), 2.0);
}

#[test]
fn angles_are_zero_before_first_update() {
    let clock = Cell::new(1234);
    let estimator = ready_estimator(&clock, EstimatorConfig::default());

    assert_eq!(estimator.estimate(), &OrientationEstimate::default());
    assert_eq!(estimator.last_sample_time(), 1234);
}

#[test]
fn stationary_sensor_converges_to_level() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    // Tilt the sensor 45 degrees around both axes first so there is something to converge from.
    run(&mut estimator, &clock, RawSample::new([-11585, 11585, 11585], [0, 0, 0]), 100, 10);
    assert!(estimator.pitch() > 20.0, "pitch {}", estimator.pitch());
    assert!(estimator.roll() > 20.0, "roll {}", estimator.roll());

    run(&mut estimator, &clock, LEVEL, 400, 10);

    assert!(libm::fabsf(estimator.pitch()) < 0.1, "pitch {}", estimator.pitch());
    assert!(libm::fabsf(estimator.roll()) < 0.1, "roll {}", estimator.roll());
    assert_eq!(estimator.yaw(), 0.0);
}

#[test]
fn level_sensor_stays_level() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    for step in [5, 10, 20, 40, 80] {
        run(&mut estimator, &clock, LEVEL, 10, step);
        assert_eq!(estimator.pitch(), 0.0);
        assert_eq!(estimator.roll(), 0.0);
        assert_eq!(estimator.yaw(), 0.0);
    }
}

#[test]
fn yaw_is_pure_integration() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    // 655 LSB = 5 deg/s, 20 ticks of 50ms.
    run(&mut estimator, &clock, RawSample::new([0, 0, 16384], [0, 0, 655]), 20, 50);

    assert!(libm::fabsf(estimator.yaw() - 20.0 * 5.0 * 0.05) < 1e-4, "yaw {}", estimator.yaw());
}

#[test]
fn yaw_ignores_accelerometer() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    run(&mut estimator, &clock, RawSample::new([8000, -9000, 3000], [0, 0, -131]), 10, 100);

    assert!(libm::fabsf(estimator.yaw() + 1.0) < 1e-4, "yaw {}", estimator.yaw());
}

#[test]
fn complementary_filter_weights() {
    let pitch = complementary_filter(0.98, 10.0, 5.0, 0.1, 8.0);
    assert!(libm::fabsf(pitch - 10.45) < 1e-4, "pitch {}", pitch);

    // Alpha at the extremes selects one of the two inputs.
    assert_eq!(complementary_filter(1.0, 10.0, 5.0, 0.1, 8.0), 10.5);
    assert_eq!(complementary_filter(0.0, 10.0, 5.0, 0.1, 8.0), 8.0);
}

#[test]
fn single_tick_matches_filter_formula() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    // Level accelerometer gives a zero reference angle, so only the gyroscope term remains.
    run(&mut estimator, &clock, RawSample::new([0, 0, 16384], [655, 1310, 0]), 1, 100);

    assert!(libm::fabsf(estimator.pitch() - 0.98 * 10.0 * 0.1) < 1e-4, "pitch {}", estimator.pitch());
    assert!(libm::fabsf(estimator.roll() - 0.98 * 5.0 * 0.1) < 1e-4, "roll {}", estimator.roll());
}

#[test]
fn accel_tilt_angles() {
    let (pitch, roll) = accel_tilt(&Vector::new(0.0, 1.0, 1.0));
    assert!(libm::fabsf(pitch - 45.0) < 1e-3);
    assert!(libm::fabsf(roll) < 1e-3);

    let (pitch, roll) = accel_tilt(&Vector::new(-1.0, 0.0, 1.0));
    assert!(libm::fabsf(pitch) < 1e-3);
    assert!(libm::fabsf(roll - 45.0) < 1e-3);

    // Free fall, nothing sensible to report.
    assert_eq!(accel_tilt(&Vector::zero()), (0.0, 0.0));
}

#[test]
fn failed_read_keeps_state_and_time() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    run(&mut estimator, &clock, RawSample::new([0, 0, 16384], [0, 0, 131]), 1, 100);
    let before = *estimator.estimate();
    assert_eq!(estimator.last_sample_time(), 100);

    clock.set(200);
    estimator.source_mut().push_failure();
    assert_eq!(estimator.update(), Err(Error::SampleUnavailable));
    assert_eq!(estimator.estimate(), &before);
    assert_eq!(estimator.last_sample_time(), 100);

    clock.set(300);
    estimator.source_mut().push(RawSample::new([0, 0, 16384], [0, 0, 131]));
    let estimate = estimator.update().unwrap();

    assert!(libm::fabsf(estimate.dt - 0.2) < 1e-6, "dt {}", estimate.dt);
    assert!(libm::fabsf(estimator.yaw() - 0.3) < 1e-5, "yaw {}", estimator.yaw());
    assert_eq!(estimator.last_sample_time(), 300);
}

#[test]
fn accessors_are_idempotent() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());
    run(&mut estimator, &clock, RawSample::new([1200, -3400, 15000], [40, -70, 300]), 3, 20);

    let first = (estimator.yaw(), estimator.pitch(), estimator.roll(), estimator.ax(), estimator.gz());
    for _ in 0..5 {
        let again = (estimator.yaw(), estimator.pitch(), estimator.roll(), estimator.ax(), estimator.gz());
        assert_eq!(first, again);
    }
}

#[test]
fn failed_begin_leaves_estimator_unusable() {
    let clock = Cell::new(50);
    let source = FakeSource { fail_initialize: true, ..Default::default() };
    let mut estimator = OrientationEstimator::new(source, &clock, EstimatorConfig::default());

    assert_eq!(estimator.begin(), Err(Error::DeviceUnavailable));
    assert_eq!(estimator.state(), EstimatorState::Uninitialized);
    assert_eq!(estimator.last_sample_time(), 0);

    estimator.source_mut().push(LEVEL);
    assert_eq!(estimator.update(), Err(Error::DeviceUnavailable));
    assert_eq!(estimator.estimate(), &OrientationEstimate::default());

    // Retrying once the device shows up works.
    estimator.source_mut().fail_initialize = false;
    assert_eq!(estimator.begin(), Ok(()));
    assert!(estimator.is_ready());
    assert_eq!(estimator.source().initialize_calls, 2);
    assert_eq!(estimator.last_sample_time(), 50);
}

#[test]
fn updates_are_throttled() {
    let clock = Cell::new(0);
    let config = EstimatorConfig::default().with_min_update_interval(99);
    let mut estimator = ready_estimator(&clock, config);
    estimator.source_mut().push(LEVEL);

    clock.set(50);
    assert_eq!(estimator.update(), Err(Error::Throttled));
    // The sample was not consumed.
    assert_eq!(estimator.source().samples.len(), 1);

    clock.set(120);
    let estimate = estimator.update().unwrap();
    assert!(libm::fabsf(estimate.dt - 0.12) < 1e-6);
    assert_eq!(estimator.source().samples.len(), 0);
}

#[test]
fn clock_going_backwards_gives_zero_dt() {
    let clock = Cell::new(1000);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    clock.set(900);
    estimator.source_mut().push(RawSample::new([0, 0, 16384], [0, 0, 131]));
    let estimate = estimator.update().unwrap();

    assert_eq!(estimate.dt, 0.0);
    assert_eq!(estimator.yaw(), 0.0);
    assert_eq!(estimator.last_sample_time(), 900);
}

#[test]
fn fused_sample_uses_quaternion() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    // 30 degrees around x, deliberately not normalized.
    let half = (15.0f32).to_radians();
    let quaternion = Quaternion::new(2.0 * libm::cosf(half), 2.0 * libm::sinf(half), 0.0, 0.0);
    clock.set(100);
    estimator.source_mut().samples.push_back(Ok(Sample::Fused {
        raw: RawSample::new([0, 8192, 14189], [131, 0, 0]),
        quaternion,
    }));
    let estimate = estimator.update().unwrap();

    assert!(estimate.angles.approx_eq(&EulerAngles::new(0.0, 0.0, 30.0), 0.01), "{:?}", estimate.angles);
    assert_eq!(estimator.gx(), 1.0);
    assert_eq!(estimator.ay(), 0.5);
}

#[test]
fn config_is_sanitized() {
    let config = EstimatorConfig::default().with_filter_alpha(1.7);
    assert_eq!(config.filter_alpha, 1.0);

    let config = EstimatorConfig { accel_scale: 0.0, gyro_scale: -1.0, filter_alpha: -0.2, min_update_interval_ms: 0 };
    let clock = Cell::new(0);
    let estimator = OrientationEstimator::new(FakeSource::default(), &clock, config);

    assert_eq!(estimator.config().accel_scale, DEFAULT_ACCEL_SCALE);
    assert_eq!(estimator.config().gyro_scale, DEFAULT_GYRO_SCALE);
    assert_eq!(estimator.config().filter_alpha, 0.0);
}

#[cfg(feature = "debug")]
#[test]
fn debug_components_track_each_sensor() {
    let clock = Cell::new(0);
    let mut estimator = ready_estimator(&clock, EstimatorConfig::default());

    let raw = RawSample::new([0, 8192, 16384], [131, 262, 393]);
    run(&mut estimator, &clock, raw, 2, 100);

    // Gyroscope only: 1, 2 and 3 deg/s integrated over 0.2 seconds.
    assert!(estimator.gyro_angles.approx_eq(&EulerAngles::new(0.6, 0.4, 0.2), 1e-5), "{:?}", estimator.gyro_angles);

    let (pitch, roll) = accel_tilt(&Vector::new(0.0, 0.5, 1.0));
    assert!(estimator.accel_angles.approx_eq(&EulerAngles::new(0.0, pitch, roll), 1e-5), "{:?}", estimator.accel_angles);

    // The fused estimate sits in between both components.
    assert!(estimator.pitch() > estimator.gyro_angles.pitch && estimator.pitch() < pitch);
}
