//! Byte mode decoder (Mode 0100)

use crate::decoder::bitstream::BitReader;

/// Byte segment reader
pub struct ByteDecoder;

impl ByteDecoder {
    /// Read `character_count` raw bytes
    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> Option<Vec<u8>> {
        (0..character_count)
            .map(|_| reader.read_bits(8).map(|b| b as u8))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_decode() {
        // "Hi" = 0x48 0x69
        let bits: Vec<bool> = "0100100001101001".bytes().map(|b| b == b'1').collect();
        let mut reader = BitReader::new(&bits);
        assert_eq!(ByteDecoder::decode(&mut reader, 2), Some(b"Hi".to_vec()));

        let mut reader = BitReader::new(&bits);
        assert_eq!(ByteDecoder::decode(&mut reader, 3), None);
    }
}
