#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelScaleRange
{
    #[default]
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

impl AccelScaleRange {
    
    /// Converts the given full scale range setting into the bits one would need to write into the
    /// `ACCEL_CONFIG` register to configure the sensor to use that scale range.
    /// 
    pub fn as_register(&self) -> u8 {
        (*self as u8) << 3
    }
    
    /// Gets the full scale range currently configured in the `ACCEL_CONFIG` register based on its
    /// contents.
    /// 
    pub fn from_register(value: u8) -> Self {
        match (value >> 3) & 0b11 {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }
    
    /// Gets the sensitivity scale factor for the given scale range.
    /// (Note scale factor is in LSB/g).
    /// 
    pub fn as_scale_factor(&self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }
}
