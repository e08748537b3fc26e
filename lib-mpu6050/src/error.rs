use core::{error::Error as CoreError, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E>
{
    /// Error reported by the underlying i2c bus.
    I2c(E),

    /// Something answered on the address but it is not a MPU6050, contains the reported id.
    WrongDevice(u8),

    /// Reading back the uploaded DMP firmware gave different bytes.
    FirmwareMismatch { bank: u8, address: u8 },

    /// The DMP firmware image does not fit into DMP memory, contains the image size in bytes.
    FirmwareTooLarge(usize),

    /// Not enough bytes in the FIFO for a complete DMP packet yet.
    NoPacket,

    /// The FIFO overflowed and was reset, packets were lost.
    FifoOverflow,
}

impl<E: fmt::Debug> CoreError for Error<E> {}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::I2c(err) => write!(f, "I2C error: {:?}", err),
            Self::WrongDevice(id) => write!(f, "Unexpected device id: {:#04x}", id),
            Self::FirmwareMismatch { bank, address } => write!(f, "DMP firmware verification failed at bank {}, address {}", bank, address),
            Self::FirmwareTooLarge(len) => write!(f, "DMP firmware of {} bytes does not fit in DMP memory", len),
            Self::NoPacket => write!(f, "No DMP packet available"),
            Self::FifoOverflow => write!(f, "FIFO overflow"),
        }
    }
}
