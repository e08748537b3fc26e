use math::*;

/// Blends a gyroscope integrated angle with an accelerometer derived angle. The gyroscope path is
/// first advanced by `rate * dt` and then weighted by `alpha`, the accelerometer angle gets the
/// remaining `1 - alpha`.
/// 
#[inline]
pub fn complementary_filter(alpha: f32, previous: f32, rate: f32, dt: f32, reference: f32) -> f32 {
    alpha * (previous + rate * dt) + (1.0 - alpha) * reference
}

/// Computes pitch and roll (in degrees) from the direction of gravity as measured by the
/// accelerometer, assuming the z-axis points up when the sensor is lying flat. This says nothing
/// about yaw and is only accurate while the device is not otherwise accelerating.
/// 
/// A zero vector (free fall, or a broken sensor) gives zero for both angles.
/// 
pub fn accel_tilt(accel: &Vector) -> (f32, f32) {
    let pitch = libm::atan2f(accel.y, libm::sqrtf(accel.x * accel.x + accel.z * accel.z));
    let roll = libm::atan2f(-accel.x, accel.z);
    (pitch * RAD_TO_DEG, roll * RAD_TO_DEG)
}
