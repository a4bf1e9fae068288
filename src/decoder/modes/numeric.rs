//! Numeric mode decoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::decoder::bitstream::BitReader;

/// Numeric segment reader
pub struct NumericDecoder;

impl NumericDecoder {
    /// Read `character_count` digits
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<Vec<u8>> {
        let mut result = Vec::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let value = reader.read_bits(group_size * 3 + 1)?;
            if value >= 10u32.pow(group_size as u32) {
                return None;
            }
            let digits = format!("{value:0width$}", width = group_size);
            result.extend_from_slice(digits.as_bytes());
            chars_remaining -= group_size;
        }

        Some(result)
    }
}
