//! Alphanumeric mode encoder (Mode 0010)
//! Pairs = 11 bits (45 * a + b), single trailing character = 6 bits

use crate::encoder::bitstream::BitBuffer;

/// Character set in value order: 0-9, A-Z, space, $%*+-./:
pub const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Alphanumeric segment writer
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Value 0-44 of a character, or `None` outside the set
    pub fn value_of(byte: u8) -> Option<u32> {
        match byte {
            b'0'..=b'9' => Some(u32::from(byte - b'0')),
            b'A'..=b'Z' => Some(u32::from(byte - b'A') + 10),
            _ => ALPHANUMERIC_CHARSET[36..]
                .iter()
                .position(|&c| c == byte)
                .map(|p| p as u32 + 36),
        }
    }

    /// Byte is in the 45-character set
    pub fn is_valid(byte: u8) -> bool {
        Self::value_of(byte).is_some()
    }

    /// Bits for `len` characters, without header
    pub fn payload_bits(len: usize) -> usize {
        11 * (len / 2) + 6 * (len % 2)
    }

    /// Append character pairs
    pub fn encode(data: &[u8], buf: &mut BitBuffer) {
        let value = |b: u8| Self::value_of(b).unwrap_or(0);
        for pair in data.chunks(2) {
            match *pair {
                [a, b] => buf.append_bits(value(a) * 45 + value(b), 11),
                [a] => buf.append_bits(value(a), 6),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_values() {
        assert_eq!(AlphanumericEncoder::value_of(b'0'), Some(0));
        assert_eq!(AlphanumericEncoder::value_of(b'Z'), Some(35));
        assert_eq!(AlphanumericEncoder::value_of(b' '), Some(36));
        assert_eq!(AlphanumericEncoder::value_of(b':'), Some(44));
        assert_eq!(AlphanumericEncoder::value_of(b'a'), None);
        assert_eq!(AlphanumericEncoder::value_of(b'#'), None);
    }

    #[test]
    fn test_alphanumeric_encode() {
        // "AC-42": (10*45+12)=462, (41*45+4)=1849, 2
        let mut buf = BitBuffer::new();
        AlphanumericEncoder::encode(b"AC-42", &mut buf);
        assert_eq!(buf.to_string(), "0011100111011100111001000010");
    }
}
