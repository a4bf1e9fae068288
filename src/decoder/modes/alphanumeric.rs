//! Alphanumeric mode decoder (Mode 0010)
//! Pairs = 11 bits, single = 6 bits

use crate::decoder::bitstream::BitReader;
use crate::encoder::modes::alphanumeric::ALPHANUMERIC_CHARSET;

/// Alphanumeric segment reader
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Read `character_count` characters
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<Vec<u8>> {
        let mut result = Vec::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                let value = reader.read_bits(11)? as usize;
                result.push(*ALPHANUMERIC_CHARSET.get(value / 45)?);
                result.push(ALPHANUMERIC_CHARSET[value % 45]);
                chars_remaining -= 2;
            } else {
                let value = reader.read_bits(6)? as usize;
                result.push(*ALPHANUMERIC_CHARSET.get(value)?);
                chars_remaining -= 1;
            }
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_decode() {
        // "A1" = (10 * 45 + 1) = 451 = 0b00111000011 (11 bits)
        let bits = vec![
            false, false, true, true, true, false, false, false, false, true, true,
        ];
        let mut reader = BitReader::new(&bits);
        assert_eq!(
            AlphanumericDecoder::decode(&mut reader, 2),
            Some(b"A1".to_vec())
        );
    }

    #[test]
    fn test_alphanumeric_odd_tail() {
        // "AC-42": 462, 1849 then a 6-bit 2
        let bits: Vec<bool> = "0011100111011100111001000010"
            .bytes()
            .map(|b| b == b'1')
            .collect();
        let mut reader = BitReader::new(&bits);
        assert_eq!(
            AlphanumericDecoder::decode(&mut reader, 5),
            Some(b"AC-42".to_vec())
        );
    }
}
