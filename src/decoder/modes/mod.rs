//! QR code data mode decoders
//!
//! Each decoder reads `count` characters of its mode from a [`BitReader`]
//! and returns the decoded bytes, or `None` when the stream is truncated or
//! holds a value outside the mode's range.
//!
//! [`BitReader`]: crate::decoder::bitstream::BitReader

/// Alphanumeric mode reader
pub mod alphanumeric;
/// Byte mode reader
pub mod byte;
/// Numeric mode reader
pub mod numeric;
