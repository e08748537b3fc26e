/// Reads a big endian `i16` starting at `offset`, the register and FIFO layout of the chip.
#[inline]
pub fn be_i16(bytes: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
pub fn be_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Reads three consecutive big endian `i16` values starting at `offset`.
#[inline]
pub fn be_i16_triple(bytes: &[u8], offset: usize) -> [i16; 3] {
    [be_i16(bytes, offset), be_i16(bytes, offset + 2), be_i16(bytes, offset + 4)]
}
