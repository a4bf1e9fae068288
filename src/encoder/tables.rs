//! Capacity tables: (version, level) -> codeword counts and block structure.

use crate::models::{ECLevel, Version};

// ISO/IEC 18004 Model 2, Table 9. Index: [ec_level][version - 1]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 40]; 4] = [
    [
        7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 40]; 4] = [
    [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14,
        15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// How a (version, level) pair splits its codewords into Reed-Solomon blocks.
///
/// Blocks `0..num_short_blocks` hold `short_block_data` data codewords, the
/// rest hold one more. Every block carries `ecc_per_block` EC codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStructure {
    /// Number of Reed-Solomon blocks
    pub num_blocks: usize,
    /// EC codewords in every block
    pub ecc_per_block: usize,
    /// Data + EC codewords in the whole symbol
    pub total_codewords: usize,
    /// Data codewords in the whole symbol
    pub data_codewords: usize,
}

impl BlockStructure {
    /// Data codewords in each of the shorter blocks
    pub fn short_block_data(&self) -> usize {
        self.data_codewords / self.num_blocks
    }

    /// Number of blocks with `short_block_data` data codewords
    pub fn num_short_blocks(&self) -> usize {
        self.num_blocks - self.data_codewords % self.num_blocks
    }

    /// Data codewords in block `index`
    pub fn block_data_len(&self, index: usize) -> usize {
        if index < self.num_short_blocks() {
            self.short_block_data()
        } else {
            self.short_block_data() + 1
        }
    }

    /// Longest block's data length
    pub fn max_block_data(&self) -> usize {
        self.block_data_len(self.num_blocks - 1)
    }
}

/// Block structure for a version and level
pub fn block_structure(version: Version, level: ECLevel) -> BlockStructure {
    let v = version.number() as usize - 1;
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[level.index()][v] as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[level.index()][v] as usize;
    let total_codewords = raw_data_modules(version) / 8;
    BlockStructure {
        num_blocks,
        ecc_per_block,
        total_codewords,
        data_codewords: total_codewords - num_blocks * ecc_per_block,
    }
}

/// Modules available for codewords (and remainder bits) once every function
/// pattern and the format/version areas are excluded.
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Data-region modules left after the last codeword (0, 3, 4 or 7)
pub fn remainder_bits(version: Version) -> usize {
    raw_data_modules(version) % 8
}

/// Data capacity in bits
pub fn data_capacity_bits(version: Version, level: ECLevel) -> usize {
    block_structure(version, level).data_codewords * 8
}
