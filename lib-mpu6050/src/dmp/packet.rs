use math::Quaternion;
use orientation::{RawSample, Sample};
use crate::utils::*;

#[cfg(feature = "dmp20")]
pub const DMP_PACKET_SIZE: u16 = 42;

#[cfg(all(feature = "dmp612", not(feature = "dmp20")))]
pub const DMP_PACKET_SIZE: u16 = 28;

#[cfg(not(any(feature = "dmp612", feature = "dmp20")))]
pub const DMP_PACKET_SIZE: u16 = 0;

/// One packet from the FIFO as written by the DMP firmware. Accelerometer and gyroscope values
/// are left in raw LSB, the quaternion is converted to floating point but not normalized.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DMPPacket {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub quaternion: Quaternion,
}

impl DMPPacket {

    /// Decodes a MotionApps 6.12 packet: quaternion as four q30 `i32`s followed by raw
    /// accelerometer and gyroscope `i16` triples.
    /// 
    #[cfg(all(feature = "dmp612", not(feature = "dmp20")))]
    pub fn parse(bs: &[u8; DMP_PACKET_SIZE as usize]) -> Self {
        const Q30: f32 = 1073741824.0;
        DMPPacket {
            quaternion: Quaternion::new(
                be_i32(bs, 0) as f32 / Q30,     // W
                be_i32(bs, 4) as f32 / Q30,     // X
                be_i32(bs, 8) as f32 / Q30,     // Y
                be_i32(bs, 12) as f32 / Q30,    // Z
            ),
            accel: be_i16_triple(bs, 16),
            gyro: be_i16_triple(bs, 22),
        }
    }

    /// Decodes a MotionApps 2.0 packet: every value is stored as an `i32` of which only the high
    /// `i16` carries data, quaternion first, then gyroscope, then accelerometer.
    /// 
    #[cfg(feature = "dmp20")]
    pub fn parse(bs: &[u8; DMP_PACKET_SIZE as usize]) -> Self {
        const Q14: f32 = 16384.0;
        DMPPacket {
            quaternion: Quaternion::new(
                be_i16(bs, 0) as f32 / Q14,     // W
                be_i16(bs, 4) as f32 / Q14,     // X
                be_i16(bs, 8) as f32 / Q14,     // Y
                be_i16(bs, 12) as f32 / Q14,    // Z
            ),
            gyro: [be_i16(bs, 16), be_i16(bs, 20), be_i16(bs, 24)],
            accel: [be_i16(bs, 28), be_i16(bs, 32), be_i16(bs, 36)],
        }
    }
}

impl From<DMPPacket> for Sample {
    fn from(packet: DMPPacket) -> Self {
        Sample::Fused {
            raw: RawSample::new(packet.accel, packet.gyro),
            quaternion: packet.quaternion,
        }
    }
}
