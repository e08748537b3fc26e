use core::ops::Div;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector
{
    pub x: f32, 
    pub y: f32,
    pub z: f32,
}

impl Vector 
{
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector { x, y, z }
    }

    /// Returns a zero vector.
    /// 
    pub const fn zero() -> Self {
        Vector { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Converts a raw sensor triple into physical units by dividing every axis by the sensor's
    /// sensitivity, i.e. `scale` is given in LSB per unit.
    /// 
    pub fn from_raw(raw: [i16; 3], scale: f32) -> Self {
        Vector::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) / scale
    }

    /// Calculate the length/magnitude of the vector
    /// 
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Approximate equality check with a given tolerance.
    pub fn approx_eq(&self, other: &Vector, tol: f32) -> bool {
        libm::fabsf(self.x - other.x) <= tol
            && libm::fabsf(self.y - other.y) <= tol
            && libm::fabsf(self.z - other.z) <= tol
    }
}

impl Div<f32> for Vector
{
    type Output = Self;

    fn div(self, other: f32) -> Self::Output {
        Vector {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}
