use tracing::debug;

use crate::encoder::bitstream::{build_data_codewords, segment_bits};
use crate::encoder::canvas::Canvas;
use crate::encoder::config::EncodeOptions;
use crate::encoder::mask::MaskEvaluator;
use crate::encoder::modes;
use crate::encoder::reed_solomon::add_ecc_and_interleave;
use crate::encoder::tables::{block_structure, data_capacity_bits};
use crate::error::EncodeError;
use crate::models::{ECLevel, Mode, QrCode, Version};

/// Main QR encoder: input bytes to finished symbol
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `data` as a single segment with the given options.
    pub fn encode(data: &[u8], options: &EncodeOptions) -> Result<QrCode, EncodeError> {
        if data.is_empty() {
            return Err(EncodeError::EmptyInput);
        }
        let (min_version, max_version) = options.version_bounds()?;

        let mode = match options.mode {
            Some(mode) => {
                modes::validate(mode, data)?;
                mode
            }
            None => modes::classify(data)?,
        };

        let version = Self::select_version(mode, data.len(), options.level, min_version, max_version)?;
        let level = if options.boost_error_correction {
            Self::boost_level(mode, data.len(), version, options.level)
        } else {
            options.level
        };
        debug!(%mode, %version, %level, len = data.len(), "selected symbol version");

        let blocks = block_structure(version, level);
        let data_codewords = build_data_codewords(mode, data, version, blocks.data_codewords)?;
        let codewords = add_ecc_and_interleave(&data_codewords, &blocks)?;
        debug!(
            data_codewords = blocks.data_codewords,
            total_codewords = codewords.len(),
            blocks = blocks.num_blocks,
            "built codeword stream"
        );

        let mut canvas = Canvas::with_function_patterns(version);
        canvas.place_data(&codewords)?;

        let mut evaluator = MaskEvaluator::new(canvas, level);
        let mask = match options.mask {
            Some(mask) => mask,
            None => evaluator.best(options.parallel_masks),
        };
        let canvas = evaluator.commit(mask);
        debug!(mask = mask.id(), forced = options.mask.is_some(), "committed mask");

        Ok(QrCode::new(
            version,
            level,
            mask,
            mode,
            canvas.to_bit_matrix(),
        ))
    }

    /// Smallest version in `min..=max` whose data capacity holds the segment.
    pub fn select_version(
        mode: Mode,
        len: usize,
        level: ECLevel,
        min: Version,
        max: Version,
    ) -> Result<Version, EncodeError> {
        for version in min.range_to(max) {
            let fits = segment_bits(mode, len, version)
                .is_some_and(|bits| bits <= data_capacity_bits(version, level));
            if fits {
                return Ok(version);
            }
        }
        Err(EncodeError::DataTooLong {
            required_bits: 4 + mode.char_count_bits(max) + modes::payload_bits(mode, len),
            capacity_bits: data_capacity_bits(max, level),
            max_version: max.number(),
            level,
        })
    }

    /// Highest level at or above `level` that still fits `version`.
    fn boost_level(mode: Mode, len: usize, version: Version, level: ECLevel) -> ECLevel {
        let Some(bits) = segment_bits(mode, len, version) else {
            return level;
        };
        ECLevel::ALL
            .into_iter()
            .filter(|&candidate| candidate >= level)
            .filter(|&candidate| bits <= data_capacity_bits(version, candidate))
            .max()
            .unwrap_or(level)
    }
}
