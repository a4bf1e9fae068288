//! Byte mode encoder (Mode 0100)
//! Each input byte is written as-is in 8 bits

use crate::encoder::bitstream::BitBuffer;

/// Byte segment writer
pub struct ByteEncoder;

impl ByteEncoder {
    /// Eight bits per byte
    pub fn payload_bits(len: usize) -> usize {
        len * 8
    }

    /// Append each byte as-is
    pub fn encode(data: &[u8], buf: &mut BitBuffer) {
        for &b in data {
            buf.append_bits(u32::from(b), 8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_encode() {
        let mut buf = BitBuffer::new();
        ByteEncoder::encode(&[0x48, 0x69], &mut buf);
        assert_eq!(buf.to_string(), "0100100001101001");
    }
}
