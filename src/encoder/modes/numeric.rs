//! Numeric mode encoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::encoder::bitstream::BitBuffer;

/// Numeric segment writer
pub struct NumericEncoder;

impl NumericEncoder {
    /// ASCII digit
    pub fn is_valid(byte: u8) -> bool {
        byte.is_ascii_digit()
    }

    /// Bits for `len` digits, without header
    pub fn payload_bits(len: usize) -> usize {
        10 * (len / 3)
            + match len % 3 {
                2 => 7,
                1 => 4,
                _ => 0,
            }
    }

    /// Append digit groups of three
    pub fn encode(data: &[u8], buf: &mut BitBuffer) {
        for group in data.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            buf.append_bits(value, group.len() * 3 + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encode() {
        // "01234567" -> 012 345 67 -> 0000001100 0101011001 1000011
        let mut buf = BitBuffer::new();
        NumericEncoder::encode(b"01234567", &mut buf);
        assert_eq!(buf.len(), 27);
        assert_eq!(buf.to_string(), "000000110001010110011000011");
    }

    #[test]
    fn test_numeric_tail_widths() {
        let mut buf = BitBuffer::new();
        NumericEncoder::encode(b"9", &mut buf);
        assert_eq!(buf.to_string(), "1001");
        let mut buf = BitBuffer::new();
        NumericEncoder::encode(b"99", &mut buf);
        assert_eq!(buf.len(), 7);
    }
}
