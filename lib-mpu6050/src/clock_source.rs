/// Clock the MPU6050 runs from, selected through the lower bits of `PWR_MGMT_1`. The datasheet
/// recommends one of the gyroscope PLLs over the internal oscillator.
/// 
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource
{
    InternalOscillator = 0,

    GyroX = 1,
    GyroY = 2,
    GyroZ = 3,
    
    External32kHz = 4,
    External19MHz = 5,

    /// Stops the clock and keeps the timing generator in reset
    Stop = 7,
}
