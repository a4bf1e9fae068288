//! Symbol reader
//!
//! Reads a finished module matrix back to its payload. The encoder uses it
//! as a round-trip check; it expects an axis-aligned matrix without quiet
//! zone and does no image detection.
//! - Format and version information BCH decoding
//! - Unmasking and zigzag bitstream extraction
//! - De-interleaving and Reed-Solomon correction
//! - Segment parsing (numeric, alphanumeric, byte)

/// Bitstream extraction from QR matrix
pub mod bitstream;
/// Data mode decoders (numeric, alphanumeric, byte)
pub mod modes;
/// Block de-interleaving and segment parsing
pub mod payload;
/// Main reader that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// QR code unmasking (removes mask patterns)
pub mod unmask;

pub use payload::Segment;
pub use qr_decoder::{DecodedSymbol, QrDecoder};
