use crate::*;

/// Orientation as a product of three rotations. Note that Euler angles suffer from gimbal lock,
/// they are mostly useful for displaying orientation since they are much easier to understand for
/// humans.
/// 
/// Yaw = rotation around Z-axis
/// Pitch = rotation around Y-axis
/// Roll = rotation around X-axis
/// 
/// The unit (radians or degrees) depends on where the angles came from, every function that
/// returns angles documents which one it uses.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles
{
    pub yaw: f32,
    pub pitch: f32, 
    pub roll: f32,
}

impl EulerAngles
{
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        EulerAngles { yaw, pitch, roll }
    }

    /// Creates an all zeros euler angles instance, i.e. the identity/no rotation angles.
    /// 
    pub const fn identity() -> Self {
        EulerAngles { yaw: 0.0, pitch: 0.0, roll: 0.0 }
    }

    /// Converts angles given in radians into degrees.
    /// 
    pub fn to_degrees(&self) -> Self {
        EulerAngles::new(self.yaw * RAD_TO_DEG, self.pitch * RAD_TO_DEG, self.roll * RAD_TO_DEG)
    }

    /// Approximate equality check with a given tolerance.
    pub fn approx_eq(&self, other: &Self, tol: f32) -> bool {
        libm::fabsf(self.yaw - other.yaw) <= tol
            && libm::fabsf(self.pitch - other.pitch) <= tol
            && libm::fabsf(self.roll - other.roll) <= tol
    }

    /// Yaw, pitch and roll (in radians) decomposed the way the MPU6050 DMP libraries do it:
    /// yaw from the quaternion itself, pitch and roll from the gravity vector it implies. Pitch
    /// is unfolded past +/-90 degrees when the device is upside down.
    /// 
    pub fn from_gravity(q: &Quaternion, gravity: &Vector) -> Self {
        let yaw = libm::atan2f(
            2.0 * q.x * q.y - 2.0 * q.w * q.z,
            2.0 * q.w * q.w + 2.0 * q.x * q.x - 1.0,
        );

        let mut pitch = libm::atan2f(
            gravity.x,
            libm::sqrtf(gravity.y * gravity.y + gravity.z * gravity.z),
        );
        let roll = libm::atan2f(gravity.y, gravity.z);

        if gravity.z < 0.0 {
            pitch = if pitch > 0.0 {
                core::f32::consts::PI - pitch
            } else {
                -core::f32::consts::PI - pitch
            };
        }

        EulerAngles::new(yaw, pitch, roll)
    }
}

impl From<&Quaternion> for EulerAngles {
    fn from(q: &Quaternion) -> Self {
        EulerAngles::from_gravity(q, &q.gravity())
    }
}

impl From<Quaternion> for EulerAngles {
    fn from(value: Quaternion) -> Self {
        EulerAngles::from(&value)
    }
}
