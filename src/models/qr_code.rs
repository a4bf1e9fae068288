use std::fmt;
use std::str::FromStr;

use super::BitMatrix;
use crate::error::ParseLevelError;

/// QR code symbol version (1-40 for Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol, 21x21 modules
    pub const MIN: Version = Version(1);
    /// Largest Model 2 symbol, 177x177 modules
    pub const MAX: Version = Version(40);
    /// Default ceiling used by [`crate::encode`]
    pub const DEFAULT_MAX: Version = Version(10);

    /// Returns `None` outside 1-40
    pub fn new(number: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Version inferred from a side length of `17 + 4 * version`
    pub fn from_size(size: usize) -> Option<Self> {
        if size < Self::MIN.size() || (size - 17) % 4 != 0 {
            return None;
        }
        u8::try_from((size - 17) / 4).ok().and_then(Self::new)
    }

    /// Get the version number
    pub fn number(self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Versions 7+ carry an 18-bit version information block
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    /// Versions from `self` up to and including `last`
    pub fn range_to(self, last: Version) -> impl Iterator<Item = Version> {
        (self.0..=last.0).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels, weakest first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit value stored in the format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(name)
    }
}

impl FromStr for ECLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ECLevel::L),
            "M" | "MEDIUM" => Ok(ECLevel::M),
            "Q" | "QUARTILE" => Ok(ECLevel::Q),
            "H" | "HIGH" => Ok(ECLevel::H),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in id order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its three-bit id
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Three-bit id written into the format information
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Check if module at row `i`, column `j` is inverted by this mask
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => (i * j) % 2 + (i * j) % 3 == 0,
            MaskPattern::Pattern6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9, three per 10 bits
    Numeric,
    /// The 45-symbol set `0-9A-Z $%*+-./:`, two per 11 bits
    Alphanumeric,
    /// Raw 8-bit bytes
    Byte,
}

impl Mode {
    /// Four-bit mode indicator
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Mode for a four-bit indicator, if it is one this crate encodes
    pub fn from_indicator(indicator: u32) -> Option<Self> {
        match indicator {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            _ => None,
        }
    }

    /// Width of the character count indicator for `version`
    pub fn char_count_bits(self, version: Version) -> usize {
        let band = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
        };
        f.write_str(name)
    }
}

/// A finished QR code symbol.
///
/// The module matrix is fixed at construction; every accessor is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    error_correction: ECLevel,
    mask_pattern: MaskPattern,
    mode: Mode,
    modules: BitMatrix,
}

impl QrCode {
    pub(crate) fn new(
        version: Version,
        error_correction: ECLevel,
        mask_pattern: MaskPattern,
        mode: Mode,
        modules: BitMatrix,
    ) -> Self {
        Self {
            version,
            error_correction,
            mask_pattern,
            mode,
            modules,
        }
    }

    /// QR code version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level the symbol was built with
    pub fn error_correction(&self) -> ECLevel {
        self.error_correction
    }

    /// Mask pattern applied to the data region
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    /// Mode the payload was encoded in
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of modules per side, without quiet zone
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Whether module (x, y) is dark; out of range reads as light
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Module matrix (true = dark)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Consume the symbol, keeping only its module matrix
    pub fn into_modules(self) -> BitMatrix {
        self.modules
    }

    /// Row-major boolean grid
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size()).map(|y| self.modules.row(y)).collect()
    }

    /// Text rendering with a light quiet zone of `quiet_zone` modules.
    pub fn to_text(&self, dark: &str, light: &str, quiet_zone: usize) -> String {
        let size = self.size();
        let span = size + 2 * quiet_zone;
        let mut out = String::with_capacity(span * (span * dark.len().max(light.len()) + 1));
        for y in 0..span {
            for x in 0..span {
                let inside = (quiet_zone..quiet_zone + size).contains(&x)
                    && (quiet_zone..quiet_zone + size).contains(&y);
                let is_dark = inside && self.get(x - quiet_zone, y - quiet_zone);
                out.push_str(if is_dark { dark } else { light });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::MAX.size(), 177);
        assert!(Version::new(0).is_none());
        assert!(Version::new(41).is_none());
    }

    #[test]
    fn test_version_from_size() {
        assert_eq!(Version::from_size(21), Version::new(1));
        assert_eq!(Version::from_size(57), Version::new(10));
        assert_eq!(Version::from_size(22), None);
        assert_eq!(Version::from_size(17), None);
        assert_eq!(Version::from_size(181), None);
    }

    #[test]
    fn test_ec_level_format_bits() {
        for level in ECLevel::ALL {
            assert_eq!(ECLevel::from_format_bits(level.format_bits()), level);
        }
        assert_eq!(ECLevel::M.format_bits(), 0b00);
        assert_eq!(ECLevel::L.format_bits(), 0b01);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("q".parse::<ECLevel>(), Ok(ECLevel::Q));
        assert_eq!("High".parse::<ECLevel>(), Ok(ECLevel::H));
        assert!("X".parse::<ECLevel>().is_err());
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));
        assert_eq!(MaskPattern::from_bits(5), Some(MaskPattern::Pattern5));
        assert_eq!(MaskPattern::from_bits(8), None);
    }

    #[test]
    fn test_char_count_bits() {
        let v9 = Version::new(9).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(Mode::Numeric.char_count_bits(v9), 10);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v10), 11);
        assert_eq!(Mode::Byte.char_count_bits(v10), 16);
        assert_eq!(Mode::Numeric.char_count_bits(v27), 14);
    }
}
