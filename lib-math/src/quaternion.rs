use core::ops::Div;
use crate::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion
{
    pub w: f32,
    pub x: f32, 
    pub y: f32,
    pub z: f32,
}

impl Quaternion 
{
    /// Create a new quaternion with the given values.
    /// 
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Returns the identity quaternion (no rotation)
    /// 
    pub const fn identity() -> Self {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Get the magnitude of the quaternion.
    /// 
    #[inline]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Normalize the quaternion to make it a unit quaternion.
    /// 
    pub fn normalize(&self) -> Quaternion {
        let magnitude = self.magnitude();
        // Cannot normalize a quaternion with zero magnitude.
        if magnitude == 0.0 {
            return *self;
        }
        *self / magnitude
    }

    /// Direction of gravity in the device frame for a device with this orientation, in units of g.
    /// 
    pub fn gravity(&self) -> Vector {
        Vector {
            x: 2.0 * (self.x * self.z - self.w * self.y),
            y: 2.0 * (self.w * self.x + self.y * self.z),
            z: self.w * self.w - self.x * self.x - self.y * self.y + self.z * self.z,
        }
    }

    /// Approximate equality check with a given tolerance.
    /// 
    pub fn approx_eq(&self, other: &Quaternion, tol: f32) -> bool {
        libm::fabsf(self.x - other.x) <= tol
            && libm::fabsf(self.y - other.y) <= tol
            && libm::fabsf(self.z - other.z) <= tol
            && libm::fabsf(self.w - other.w) <= tol
    }
}

impl Div<f32> for Quaternion
{
    type Output = Self;

    fn div(self, other: f32) -> Self::Output {
        Quaternion {
            w: self.w / other,
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}
