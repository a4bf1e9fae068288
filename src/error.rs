//! Error types for encoding and matrix verification.

use thiserror::Error;

use crate::models::{ECLevel, Mode};

/// Reasons an encode call can fail. No partial symbol is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The input has no bytes.
    #[error("input is empty")]
    EmptyInput,

    /// The payload does not fit any allowed version at this level.
    #[error(
        "data needs {required_bits} bits but version {max_version} at level {level} holds {capacity_bits}"
    )]
    DataTooLong {
        /// Encoded length at the largest allowed version
        required_bits: usize,
        /// Data capacity of the largest allowed version
        capacity_bits: usize,
        /// Version ceiling that was tried
        max_version: u8,
        /// Requested error correction level
        level: ECLevel,
    },

    /// A forced mode cannot represent a byte of the input.
    #[error("byte 0x{byte:02X} at offset {offset} is not valid in {mode} mode")]
    UnsupportedCharacter {
        /// Mode that rejected the byte
        mode: Mode,
        /// Offending byte
        byte: u8,
        /// Position in the input
        offset: usize,
    },

    /// Version bounds outside 1-40, or minimum above maximum.
    #[error("invalid version bound {0}")]
    InvalidVersion(u8),

    /// The codeword stream does not match the symbol's data region.
    #[error("codeword stream has {actual} codewords, symbol expects {expected}")]
    CapacityMismatch {
        /// Codewords the version/level requires
        expected: usize,
        /// Codewords actually produced
        actual: usize,
    },
}

/// Reasons a module matrix cannot be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Matrix is not square or its side is not `17 + 4 * version`.
    #[error("matrix of {width}x{height} is not a QR symbol size")]
    InvalidDimension {
        /// Matrix width
        width: usize,
        /// Matrix height
        height: usize,
    },

    /// Neither format information copy is within BCH distance.
    #[error("format information is unreadable")]
    FormatInfo,

    /// Version information disagrees with the matrix size.
    #[error("version information says {found}, matrix size says {expected}")]
    VersionMismatch {
        /// Version implied by the side length
        expected: u8,
        /// Version read from the symbol
        found: u8,
    },

    /// A Reed-Solomon block has more errors than it can correct.
    #[error("block {block} has uncorrectable errors")]
    Uncorrectable {
        /// Index of the failing block
        block: usize,
    },

    /// The corrected data codewords do not parse as segments.
    #[error("malformed payload: {0}")]
    MalformedPayload(&'static str),
}

/// Error returned when parsing an [`ECLevel`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error correction level `{0}` (expected L, M, Q or H)")]
pub struct ParseLevelError(pub String);

/// Reasons a payload builder rejects its fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// A required field is empty after trimming.
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),

    /// A numeric field is outside its valid range.
    #[error("{field} value {value} is out of range")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// The URL does not parse even after adding a scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A date or time field does not parse.
    #[error("invalid date/time: {0}")]
    InvalidDateTime(#[from] chrono::ParseError),

    /// An event ends before it starts.
    #[error("event ends before it starts")]
    EndBeforeStart,
}
