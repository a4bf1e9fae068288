//! Format information: EC level and mask id, BCH(15,5) protected and XOR-masked.

use crate::encoder::bch::FORMAT_BCH;
use crate::models::{ECLevel, MaskPattern};

/// XOR applied to the 15-bit format word so it is never all-light
pub const FORMAT_XOR_MASK: u16 = 0x5412;

/// Format info is 15 bits (5 data + 10 ECC), written twice in every symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask applied to the data region
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Pair a level with a mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Final 15-bit word: (level bits << 3 | mask id), BCH, XOR mask
    pub fn encode(self) -> u16 {
        let data = u32::from(self.ec_level.format_bits()) << 3 | u32::from(self.mask_pattern.id());
        (FORMAT_BCH.encode(data) as u16) ^ FORMAT_XOR_MASK
    }

    /// Decode a 15-bit word read from a symbol, tolerating up to 3 bit errors.
    pub fn decode(word: u16) -> Option<Self> {
        let data = FORMAT_BCH.decode_nearest(
            u32::from(word),
            u32::from(FORMAT_XOR_MASK),
            0..32,
            3,
        )?;
        let ec_level = ECLevel::from_format_bits((data >> 3) as u8);
        let mask_pattern = MaskPattern::from_bits((data & 0x07) as u8)?;
        Some(Self::new(ec_level, mask_pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format_word() {
        let info = FormatInfo::new(ECLevel::M, MaskPattern::Pattern0);
        assert_eq!(info.encode(), 0b101010000010010);
        let info = FormatInfo::new(ECLevel::L, MaskPattern::Pattern4);
        assert_eq!(info.encode(), 0b110011000101111);
        let info = FormatInfo::new(ECLevel::H, MaskPattern::Pattern7);
        assert_eq!(info.encode(), 0b000100000111011);
    }

    #[test]
    fn test_format_decode_all() {
        for level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let info = FormatInfo::new(level, mask);
                assert_eq!(FormatInfo::decode(info.encode()), Some(info));
                // Three flipped bits are still recoverable
                assert_eq!(FormatInfo::decode(info.encode() ^ 0b0100_0100_0000_0001), Some(info));
            }
        }
    }
}
