//! Data codeword assembly: mode indicator, count, payload, terminator, padding.

use std::fmt;

use crate::encoder::modes;
use crate::error::EncodeError;
use crate::models::{Mode, Version};

/// Pad codewords appended alternately after the terminator
pub const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Append-only MSB-first bit sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits`
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// No bits written yet
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, most significant first.
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        self.bits
            .extend((0..count).rev().map(|i| (value >> i) & 1 == 1));
    }

    /// Pack into bytes; a trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | (u8::from(b) << (7 - i)))
            })
            .collect()
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Length in bits of a single segment at `version`, or `None` when the
/// character count does not fit the count indicator.
pub fn segment_bits(mode: Mode, len: usize, version: Version) -> Option<usize> {
    let count_bits = mode.char_count_bits(version);
    if len >= 1 << count_bits {
        return None;
    }
    Some(4 + count_bits + modes::payload_bits(mode, len))
}

/// Build the full data codeword sequence for one segment.
///
/// `data_codewords` is the data capacity of the chosen version and level; the
/// result always has exactly that many codewords.
pub fn build_data_codewords(
    mode: Mode,
    data: &[u8],
    version: Version,
    data_codewords: usize,
) -> Result<Vec<u8>, EncodeError> {
    let capacity_bits = data_codewords * 8;
    let mut buf = BitBuffer::with_capacity(capacity_bits);
    buf.append_bits(mode.indicator(), 4);
    buf.append_bits(data.len() as u32, mode.char_count_bits(version));
    modes::encode_payload(mode, data, &mut buf);

    if buf.len() > capacity_bits {
        return Err(EncodeError::CapacityMismatch {
            expected: data_codewords,
            actual: buf.len().div_ceil(8),
        });
    }

    // Terminator, shortened when capacity runs out
    buf.append_bits(0, (capacity_bits - buf.len()).min(4));
    buf.append_bits(0, (8 - buf.len() % 8) % 8);

    let mut codewords = buf.to_bytes();
    let pad_count = data_codewords - codewords.len();
    codewords.extend(PAD_CODEWORDS.iter().cycle().take(pad_count));

    tracing::trace!(
        segment_bits = buf.len(),
        pad_count,
        "assembled data codewords"
    );
    Ok(codewords)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_append_and_pack() {
        let mut buf = BitBuffer::new();
        buf.append_bits(0b0001, 4);
        buf.append_bits(0b101, 3);
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.to_string(), "0001101");
        assert_eq!(buf.to_bytes(), vec![0b0001_1010]);
    }

    #[test]
    fn test_numeric_codewords() {
        let codewords = build_data_codewords(Mode::Numeric, b"01234567", v(1), 16).unwrap();
        assert_eq!(
            codewords,
            vec![
                0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
                0x11, 0xEC, 0x11
            ]
        );
    }

    #[test]
    fn test_alphanumeric_codewords() {
        let codewords = build_data_codewords(Mode::Alphanumeric, b"HELLO WORLD", v(1), 13).unwrap();
        assert_eq!(
            codewords,
            vec![32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236]
        );
    }

    #[test]
    fn test_short_terminator_at_capacity() {
        // 17 bytes at 1-L: 148 bits of 152, the terminator fills the rest.
        let data = [b'a'; 17];
        let codewords = build_data_codewords(Mode::Byte, &data, v(1), 19).unwrap();
        assert_eq!(codewords.len(), 19);
        assert_eq!(codewords[18] & 0x0F, 0);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let data = [b'a'; 18];
        assert!(matches!(
            build_data_codewords(Mode::Byte, &data, v(1), 19),
            Err(EncodeError::CapacityMismatch { expected: 19, .. })
        ));
    }

    #[test]
    fn test_segment_bits() {
        assert_eq!(segment_bits(Mode::Numeric, 8, v(1)), Some(41));
        assert_eq!(segment_bits(Mode::Byte, 10, v(10)), Some(4 + 16 + 80));
        assert_eq!(segment_bits(Mode::Byte, 256, v(9)), None);
    }
}
