//! qr_forge - QR Code Model 2 symbol encoder
//!
//! Turns text or bytes into a square module matrix: mode selection, version
//! selection, Reed-Solomon error correction, block interleaving, module
//! placement and penalty-scored masking. A matching reader decodes the
//! matrix back for round-trip checks.
//!
//! ```
//! use qr_forge::{ECLevel, encode};
//!
//! let qr = encode("HELLO WORLD", ECLevel::M).unwrap();
//! assert_eq!(qr.size(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Symbol reader used to verify encoded matrices
pub mod decoder;
/// QR code encoding pipeline (modes, codewords, layout, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QrCode, BitMatrix, Version, etc.)
pub mod models;
/// Payload string builders (URL, Wi-Fi, vCard, ...)
pub mod payload;
/// Utility functions (GF(256) arithmetic)
pub mod utils;

pub use decoder::{DecodedSymbol, QrDecoder, Segment};
pub use encoder::{EncodeOptions, QrEncoder};
pub use error::{DecodeError, EncodeError, ParseLevelError, PayloadError};
pub use models::{BitMatrix, ECLevel, MaskPattern, Mode, QrCode, Version};

/// Encode `data` at `level`, picking the smallest version up to 10.
///
/// The densest mode that covers every byte is used. Fails with
/// [`EncodeError::DataTooLong`] when version 10 cannot hold the data.
pub fn encode(data: impl AsRef<[u8]>, level: ECLevel) -> Result<QrCode, EncodeError> {
    encode_with_options(data, &EncodeOptions::new(level))
}

/// Like [`encode`], with a different version ceiling (1-40).
pub fn encode_with_max_version(
    data: impl AsRef<[u8]>,
    level: ECLevel,
    max_version: u8,
) -> Result<QrCode, EncodeError> {
    encode_with_options(
        data,
        &EncodeOptions::new(level).with_max_version(max_version),
    )
}

/// Encode with full control over version range, mode and mask.
pub fn encode_with_options(
    data: impl AsRef<[u8]>,
    options: &EncodeOptions,
) -> Result<QrCode, EncodeError> {
    QrEncoder::encode(data.as_ref(), options)
}

/// Read a module matrix (no quiet zone) back to its payload.
pub fn decode_matrix(matrix: &BitMatrix) -> Result<DecodedSymbol, DecodeError> {
    QrDecoder::decode_matrix(matrix)
}
