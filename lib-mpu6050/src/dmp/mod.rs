pub mod packet;
pub use packet::*;

/// Size of one DMP memory bank.
pub const DMP_MEMORY_BANK_SIZE: u16 = 256;

/// Maximum number of bytes written to DMP memory in a single i2c transaction.
pub const DMP_MEMORY_CHUNK_SIZE: usize = 16;

/// Address in DMP memory where the firmware's program starts.
pub const DMP_START_ADDRESS: u16 = 0x0400;

/// Capacity of the MPU6050 FIFO, once it holds this many bytes it has overflowed.
pub const FIFO_SIZE: u16 = 1024;

/// Number of DMP memory banks addressable through `BANK_SEL`.
pub const DMP_MEMORY_BANKS: usize = 32;

/// In Hz; rate at which the DMP firmware produces packets before the FIFO rate divisor applies.
pub const DMP_BASE_RATE_HZ: u16 = 200;

/// Bank and address of the FIFO rate divisor inside DMP memory.
pub const DMP_FIFO_RATE_BANK: u8 = 0x02;
pub const DMP_FIFO_RATE_ADDRESS: u8 = 0x16;

/// In Hz; default DMP output rate.
pub const DEFAULT_DMP_OUTPUT_RATE_HZ: u8 = 10;

/// FIFO rate divisor that makes the DMP output `base_rate / (1 + divisor)` packets per second,
/// rates outside of `1..=200` Hz are clamped.
/// 
pub fn dmp_rate_divisor(rate_hz: u8) -> u16 {
    DMP_BASE_RATE_HZ / (rate_hz as u16).clamp(1, DMP_BASE_RATE_HZ) - 1
}

/// In milliseconds; FIFO poll interval for the given output rate. Polls slightly faster than the
/// DMP outputs so no packet is skipped, e.g. every 99ms at 10Hz.
/// 
pub fn dmp_poll_interval_ms(rate_hz: u8) -> u32 {
    let rate = (rate_hz as u32).clamp(1, DMP_BASE_RATE_HZ as u32);
    (1000 / rate).saturating_sub(1)
}
