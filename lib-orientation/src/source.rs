use core::fmt::Debug;
use crate::*;

/// Anything that can produce 6-axis motion samples, usually a sensor driver.
/// 
pub trait RawSampleSource
{
    type Error: Debug;

    /// Sets up communication with the device. Implementations are free to retry internally but
    /// must eventually give up and report an error.
    /// 
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Reads the most recent sample from the device.
    /// 
    fn read_raw(&mut self) -> Result<Sample, Self::Error>;
}

impl<S: RawSampleSource + ?Sized> RawSampleSource for &mut S
{
    type Error = S::Error;

    #[inline]
    fn initialize(&mut self) -> Result<(), Self::Error> {
        (**self).initialize()
    }

    #[inline]
    fn read_raw(&mut self) -> Result<Sample, Self::Error> {
        (**self).read_raw()
    }
}
