/// BCH codes protecting the format (15,5) and version (18,6) information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bch {
    generator: u32,
    degree: u32,
    data_bits: u32,
}

/// BCH(15,5), generator x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_BCH: Bch = Bch {
    generator: 0x537,
    degree: 10,
    data_bits: 5,
};

/// BCH(18,6), generator x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_BCH: Bch = Bch {
    generator: 0x1F25,
    degree: 12,
    data_bits: 6,
};

impl Bch {
    /// Check bits: remainder of data * x^degree modulo the generator
    pub fn remainder(&self, data: u32) -> u32 {
        let mut rem = data;
        for _ in 0..self.degree {
            rem = (rem << 1) ^ ((rem >> (self.degree - 1)) * self.generator);
        }
        rem & ((1 << self.degree) - 1)
    }

    /// Data bits followed by their check bits
    pub fn encode(&self, data: u32) -> u32 {
        debug_assert!(data >> self.data_bits == 0);
        (data << self.degree) | self.remainder(data)
    }

    /// Data value whose codeword (after XOR with `xor_mask`) is nearest to
    /// `word`, accepted when at most `max_errors` bits differ.
    pub fn decode_nearest(
        &self,
        word: u32,
        xor_mask: u32,
        candidates: impl IntoIterator<Item = u32>,
        max_errors: u32,
    ) -> Option<u32> {
        candidates
            .into_iter()
            .map(|data| {
                let distance = ((self.encode(data) ^ xor_mask) ^ word).count_ones();
                (distance, data)
            })
            .min()
            .filter(|&(distance, _)| distance <= max_errors)
            .map(|(_, data)| data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_encode() {
        // Level M (00), mask 0: before the 0x5412 XOR
        assert_eq!(FORMAT_BCH.encode(0b00000), 0);
        assert_eq!(FORMAT_BCH.encode(0b00001), 0b00001_0100110111);
    }

    #[test]
    fn test_version_encode() {
        assert_eq!(VERSION_BCH.encode(7), 0x07C94);
        assert_eq!(VERSION_BCH.encode(40), 0x28C69);
    }

    #[test]
    fn test_decode_nearest_corrects_three_bits() {
        let word = FORMAT_BCH.encode(0b10110) ^ 0b100_0000_0100_0001;
        assert_eq!(FORMAT_BCH.decode_nearest(word, 0, 0..32, 3), Some(0b10110));
        let word = VERSION_BCH.encode(21) ^ 0b11;
        assert_eq!(VERSION_BCH.decode_nearest(word, 0, 7..=40, 3), Some(21));
    }
}
