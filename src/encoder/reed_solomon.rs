//! Reed-Solomon error correction codewords and block interleaving.
//!
//! The generator for `n` EC codewords is the product of (x - alpha^i) for
//! i in 0..n. EC codewords are the remainder of data * x^n divided by it.

use crate::encoder::tables::BlockStructure;
use crate::error::EncodeError;
use crate::utils::Gf256;

/// Reed-Solomon encoder for a fixed number of EC codewords
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    /// Generator coefficients, highest degree first, leading 1 omitted
    generator: Vec<Gf256>,
}

impl ReedSolomonEncoder {
    /// Generator for `degree` EC codewords per block
    pub fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "degree out of range");
        // Start from the monomial 1 and multiply in (x - alpha^i) one root at a time.
        let mut generator = vec![Gf256::ZERO; degree];
        generator[degree - 1] = Gf256::ONE;
        let mut root = Gf256::ONE;
        for _ in 0..degree {
            for j in 0..degree {
                generator[j] *= root;
                if j + 1 < degree {
                    let next = generator[j + 1];
                    generator[j] += next;
                }
            }
            root *= Gf256::ALPHA;
        }
        Self { generator }
    }

    /// Number of EC codewords produced
    pub fn degree(&self) -> usize {
        self.generator.len()
    }

    /// EC codewords for one block of data.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut remainder = vec![Gf256::ZERO; self.degree()];
        for &byte in data {
            let factor = Gf256::new(byte) + remainder[0];
            remainder.rotate_left(1);
            if let Some(last) = remainder.last_mut() {
                *last = Gf256::ZERO;
            }
            for (r, &g) in remainder.iter_mut().zip(&self.generator) {
                *r += g * factor;
            }
        }
        remainder.into_iter().map(u8::from).collect()
    }
}

/// Split data codewords into blocks, append EC to each, then interleave.
///
/// Data codewords are taken column by column across blocks, skipping short
/// blocks once they run out; EC codewords follow the same way.
pub fn add_ecc_and_interleave(
    data: &[u8],
    blocks: &BlockStructure,
) -> Result<Vec<u8>, EncodeError> {
    if data.len() != blocks.data_codewords {
        return Err(EncodeError::CapacityMismatch {
            expected: blocks.data_codewords,
            actual: data.len(),
        });
    }

    let rs = ReedSolomonEncoder::new(blocks.ecc_per_block);
    let mut data_blocks = Vec::with_capacity(blocks.num_blocks);
    let mut ecc_blocks = Vec::with_capacity(blocks.num_blocks);
    let mut offset = 0;
    for b in 0..blocks.num_blocks {
        let len = blocks.block_data_len(b);
        let block = &data[offset..offset + len];
        ecc_blocks.push(rs.encode(block));
        data_blocks.push(block);
        offset += len;
    }

    let mut result = Vec::with_capacity(blocks.total_codewords);
    for i in 0..blocks.max_block_data() {
        result.extend(data_blocks.iter().filter_map(|block| block.get(i)));
    }
    for i in 0..blocks.ecc_per_block {
        result.extend(ecc_blocks.iter().map(|block| block[i]));
    }

    if result.len() != blocks.total_codewords {
        return Err(EncodeError::CapacityMismatch {
            expected: blocks.total_codewords,
            actual: result.len(),
        });
    }
    tracing::trace!(
        blocks = blocks.num_blocks,
        ecc_per_block = blocks.ecc_per_block,
        total = result.len(),
        "interleaved codewords"
    );
    Ok(result)
}
