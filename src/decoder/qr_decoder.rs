use tracing::debug;

use crate::decoder::bitstream::BitstreamExtractor;
use crate::decoder::payload::{Segment, decode_payload, deinterleave_and_correct};
use crate::decoder::unmask::unmask;
use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::{
    FunctionMask, format_position_primary, format_position_secondary, version_position,
};
use crate::encoder::tables::block_structure;
use crate::encoder::version::decode_version_info;
use crate::error::DecodeError;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Result of reading a module matrix back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Concatenated segment data
    pub data: Vec<u8>,
    /// Version from the matrix size
    pub version: Version,
    /// Level from format information
    pub ec_level: ECLevel,
    /// Mask from format information
    pub mask_pattern: MaskPattern,
    /// Segment headers in stream order
    pub segments: Vec<Segment>,
    /// Codewords repaired by Reed-Solomon correction
    pub corrected_codewords: usize,
}

impl DecodedSymbol {
    /// Data as UTF-8 text, if valid
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// Reads an axis-aligned module matrix (no quiet zone) back to its payload
pub struct QrDecoder;

impl QrDecoder {
    /// Read the symbol, correcting errors in each block
    pub fn decode_matrix(matrix: &BitMatrix) -> Result<DecodedSymbol, DecodeError> {
        let (width, height) = (matrix.width(), matrix.height());
        let version = Version::from_size(width)
            .filter(|_| width == height)
            .ok_or(DecodeError::InvalidDimension { width, height })?;

        let format = Self::read_format(matrix).ok_or(DecodeError::FormatInfo)?;

        if version.has_version_info() {
            if let Some(found) = Self::read_version(matrix) {
                if found != version {
                    return Err(DecodeError::VersionMismatch {
                        expected: version.number(),
                        found: found.number(),
                    });
                }
            }
        }

        let func = FunctionMask::new(version);
        let mut unmasked = matrix.clone();
        unmask(&mut unmasked, format.mask_pattern, &func);

        let codewords = BitstreamExtractor::extract_codewords(&unmasked, &func);
        let blocks = block_structure(version, format.ec_level);
        let (data_codewords, corrected_codewords) = deinterleave_and_correct(&codewords, &blocks)?;
        let (data, segments) = decode_payload(&data_codewords, version)?;

        debug!(
            %version,
            level = %format.ec_level,
            mask = format.mask_pattern.id(),
            corrected_codewords,
            len = data.len(),
            "decoded symbol"
        );

        Ok(DecodedSymbol {
            data,
            version,
            ec_level: format.ec_level,
            mask_pattern: format.mask_pattern,
            segments,
            corrected_codewords,
        })
    }

    /// Primary copy first, then the split copy
    fn read_format(matrix: &BitMatrix) -> Option<FormatInfo> {
        let size = matrix.width();
        let read = |position: &dyn Fn(usize) -> (usize, usize)| {
            (0..15).fold(0u16, |word, i| {
                let (x, y) = position(i);
                word | (u16::from(matrix.get(x, y)) << i)
            })
        };
        FormatInfo::decode(read(&format_position_primary))
            .or_else(|| FormatInfo::decode(read(&|i| format_position_secondary(i, size))))
    }

    /// Top-right block first, then the bottom-left transpose
    fn read_version(matrix: &BitMatrix) -> Option<Version> {
        let size = matrix.width();
        let read = |transpose: bool| {
            (0..18).fold(0u32, |word, i| {
                let (a, b) = version_position(i, size);
                let (x, y) = if transpose { (b, a) } else { (a, b) };
                word | (u32::from(matrix.get(x, y)) << i)
            })
        };
        decode_version_info(read(false)).or_else(|| decode_version_info(read(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeOptions, QrEncoder};
    use crate::models::Mode;

    fn encode(data: &[u8], level: ECLevel, max_version: u8) -> BitMatrix {
        let options = EncodeOptions::new(level).with_max_version(max_version);
        QrEncoder::encode(data, &options).unwrap().into_modules()
    }

    #[test]
    fn test_roundtrip_small() {
        let matrix = encode(b"HELLO WORLD", ECLevel::Q, 10);
        let decoded = QrDecoder::decode_matrix(&matrix).unwrap();
        assert_eq!(decoded.text(), Some("HELLO WORLD"));
        assert_eq!(decoded.ec_level, ECLevel::Q);
        assert_eq!(decoded.segments[0].mode, Mode::Alphanumeric);
        assert_eq!(decoded.corrected_codewords, 0);
    }

    #[test]
    fn test_roundtrip_with_version_info() {
        let data = vec![b'x'; 200];
        let matrix = encode(&data, ECLevel::M, 40);
        let decoded = QrDecoder::decode_matrix(&matrix).unwrap();
        assert!(decoded.version.has_version_info());
        assert_eq!(decoded.data, data);
    }

    #[test]
    fn test_invalid_dimension() {
        assert_eq!(
            QrDecoder::decode_matrix(&BitMatrix::new(21, 25)),
            Err(DecodeError::InvalidDimension {
                width: 21,
                height: 25
            })
        );
        assert_eq!(
            QrDecoder::decode_matrix(&BitMatrix::square(22)),
            Err(DecodeError::InvalidDimension {
                width: 22,
                height: 22
            })
        );
    }

    #[test]
    fn test_blank_matrix_has_no_format() {
        assert_eq!(
            QrDecoder::decode_matrix(&BitMatrix::square(21)),
            Err(DecodeError::FormatInfo)
        );
    }

    #[test]
    fn test_format_falls_back_to_second_copy() {
        let mut matrix = encode(b"FALLBACK", ECLevel::H, 10);
        for i in 0..8 {
            let (x, y) = format_position_primary(i);
            matrix.toggle(x, y);
        }
        let decoded = QrDecoder::decode_matrix(&matrix).unwrap();
        assert_eq!(decoded.data, b"FALLBACK");
        assert_eq!(decoded.ec_level, ECLevel::H);
    }
}
