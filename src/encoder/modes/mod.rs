//! Segment encoders for the three supported data modes
//!
//! - Numeric: digits, three per 10 bits
//! - Alphanumeric: the 45-symbol set, two per 11 bits
//! - Byte: raw 8-bit data

/// Alphanumeric mode writer
pub mod alphanumeric;
/// Byte mode writer
pub mod byte;
/// Numeric mode writer
pub mod numeric;

use crate::encoder::bitstream::BitBuffer;
use crate::error::EncodeError;
use crate::models::Mode;

use alphanumeric::AlphanumericEncoder;
use byte::ByteEncoder;
use numeric::NumericEncoder;

/// Pick the densest mode that represents every byte of `data`.
pub fn classify(data: &[u8]) -> Result<Mode, EncodeError> {
    if data.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    let mut numeric = true;
    let mut alphanumeric = true;
    for &b in data {
        numeric &= NumericEncoder::is_valid(b);
        alphanumeric &= AlphanumericEncoder::is_valid(b);
        if !alphanumeric {
            return Ok(Mode::Byte);
        }
    }
    Ok(if numeric {
        Mode::Numeric
    } else {
        Mode::Alphanumeric
    })
}

/// Check that `mode` can carry every byte of `data`.
pub fn validate(mode: Mode, data: &[u8]) -> Result<(), EncodeError> {
    if data.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    let is_valid: fn(u8) -> bool = match mode {
        Mode::Numeric => NumericEncoder::is_valid,
        Mode::Alphanumeric => AlphanumericEncoder::is_valid,
        Mode::Byte => return Ok(()),
    };
    match data.iter().position(|&b| !is_valid(b)) {
        Some(offset) => Err(EncodeError::UnsupportedCharacter {
            mode,
            byte: data[offset],
            offset,
        }),
        None => Ok(()),
    }
}

/// Payload length in bits, excluding mode indicator and count
pub fn payload_bits(mode: Mode, len: usize) -> usize {
    match mode {
        Mode::Numeric => NumericEncoder::payload_bits(len),
        Mode::Alphanumeric => AlphanumericEncoder::payload_bits(len),
        Mode::Byte => ByteEncoder::payload_bits(len),
    }
}

/// Append the payload bits of `data` in `mode`. `data` must already be valid.
pub fn encode_payload(mode: Mode, data: &[u8], buf: &mut BitBuffer) {
    match mode {
        Mode::Numeric => NumericEncoder::encode(data, buf),
        Mode::Alphanumeric => AlphanumericEncoder::encode(data, buf),
        Mode::Byte => ByteEncoder::encode(data, buf),
    }
}
