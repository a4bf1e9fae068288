//! Bitstream extraction from an unmasked symbol, and MSB-first bit reading.

use crate::encoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Extract raw bitstream from QR code matrix following zigzag pattern
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Extract data bits from matrix (excluding function patterns)
    pub fn extract(matrix: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
        func.data_positions()
            .into_iter()
            .map(|(x, y)| matrix.get(x, y))
            .collect()
    }

    /// Whole codewords in placement order; remainder bits are dropped.
    pub fn extract_codewords(matrix: &BitMatrix, func: &FunctionMask) -> Vec<u8> {
        bits_to_codewords(&Self::extract(matrix, func))
    }
}

/// Pack bits MSB first, ignoring a trailing partial byte
pub fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
        .collect()
}

/// Sequential reader over an MSB-first bit sequence
pub struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    /// Reader positioned at the first bit
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    /// Bits not yet read
    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    /// Next `n` bits MSB first, `None` past the end
    pub fn read_bits(&mut self, n: usize) -> Option<u32> {
        if self.idx + n > self.bits.len() {
            return None;
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | u32::from(self.bits[self.idx]);
            self.idx += 1;
        }
        Some(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::raw_data_modules;
    use crate::models::Version;

    #[test]
    fn test_bitstream_extraction() {
        let version = Version::new(1).unwrap();
        let matrix = BitMatrix::square(21);
        let func = FunctionMask::new(version);
        let bits = BitstreamExtractor::extract(&matrix, &func);
        assert_eq!(bits.len(), raw_data_modules(version));
        assert_eq!(BitstreamExtractor::extract_codewords(&matrix, &func).len(), 26);
    }

    #[test]
    fn test_bits_to_codewords() {
        let bits = [true, false, false, false, false, false, false, true, true];
        assert_eq!(bits_to_codewords(&bits), vec![0x81]);
    }

    #[test]
    fn test_bit_reader() {
        let bits = [true, false, true, true, false];
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_bits(3), Some(0b101));
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_bits(3), None);
        assert_eq!(reader.read_bits(2), Some(0b10));
    }
}
