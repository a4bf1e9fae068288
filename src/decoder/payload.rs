use crate::decoder::bitstream::BitReader;
use crate::decoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, numeric::NumericDecoder,
};
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::encoder::tables::BlockStructure;
use crate::error::DecodeError;
use crate::models::{Mode, Version};

/// One decoded segment header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Mode indicator of the segment
    pub mode: Mode,
    /// Character count from the segment header
    pub char_count: usize,
}

/// Undo block interleaving, correct each block, and return the data
/// codewords with the number of corrected codewords.
pub fn deinterleave_and_correct(
    codewords: &[u8],
    blocks: &BlockStructure,
) -> Result<(Vec<u8>, usize), DecodeError> {
    if codewords.len() != blocks.total_codewords {
        return Err(DecodeError::MalformedPayload(
            "codeword count does not match version",
        ));
    }

    let mut split: Vec<Vec<u8>> = (0..blocks.num_blocks)
        .map(|b| Vec::with_capacity(blocks.block_data_len(b) + blocks.ecc_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..blocks.max_block_data() {
        for (b, block) in split.iter_mut().enumerate() {
            if i < blocks.block_data_len(b) {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..blocks.ecc_per_block {
        for block in split.iter_mut() {
            block.extend(stream.next());
        }
    }

    let rs = ReedSolomonDecoder::new(blocks.ecc_per_block);
    let mut data_out = Vec::with_capacity(blocks.data_codewords);
    let mut corrected = 0;
    for (b, block) in split.iter_mut().enumerate() {
        corrected += rs
            .decode(block)
            .map_err(|_| DecodeError::Uncorrectable { block: b })?;
        data_out.extend_from_slice(&block[..blocks.block_data_len(b)]);
    }

    Ok((data_out, corrected))
}

/// Parse segments from corrected data codewords until the terminator.
pub fn decode_payload(
    data_codewords: &[u8],
    version: Version,
) -> Result<(Vec<u8>, Vec<Segment>), DecodeError> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect();

    let mut reader = BitReader::new(&bits);
    let mut data = Vec::new();
    let mut segments = Vec::new();

    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4).unwrap_or(0);
        if indicator == 0 {
            break;
        }
        let mode = Mode::from_indicator(indicator)
            .ok_or(DecodeError::MalformedPayload("unsupported mode indicator"))?;
        let char_count = reader
            .read_bits(mode.char_count_bits(version))
            .ok_or(DecodeError::MalformedPayload("truncated character count"))?
            as usize;

        let decoded = match mode {
            Mode::Numeric => NumericDecoder::decode(&mut reader, char_count),
            Mode::Alphanumeric => AlphanumericDecoder::decode(&mut reader, char_count),
            Mode::Byte => ByteDecoder::decode(&mut reader, char_count),
        }
        .ok_or(DecodeError::MalformedPayload("truncated segment data"))?;

        data.extend_from_slice(&decoded);
        segments.push(Segment { mode, char_count });
    }

    Ok((data, segments))
}
