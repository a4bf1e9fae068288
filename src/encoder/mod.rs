//! QR code encoding modules
//!
//! This module contains the encoding pipeline, leaves first:
//! - Capacity tables and block structure
//! - Data mode encoders (numeric, alphanumeric, byte) and codeword assembly
//! - Reed-Solomon EC codewords and interleaving
//! - Symbol layout, data placement and mask selection

/// BCH codes for format and version info
pub mod bch;
/// Data codeword assembly
pub mod bitstream;
/// Symbol under construction
pub mod canvas;
/// Encoder options and environment defaults
pub mod config;
/// Format information (EC level, mask pattern)
pub mod format;
/// Function module layout shared with the symbol reader
pub mod function_mask;
/// Mask penalty scoring and selection
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte)
pub mod modes;
/// Main encoder that orchestrates the pipeline
pub mod qr_encoder;
/// Reed-Solomon EC codewords
pub mod reed_solomon;
/// ISO 18004 capacity tables (EC codewords, block counts)
pub mod tables;
/// Version information (versions 7-40)
pub mod version;

pub use config::EncodeOptions;
pub use qr_encoder::QrEncoder;
