//! Version information (versions 7-40): 6-bit version number, BCH(18,6) protected.

use crate::encoder::bch::VERSION_BCH;
use crate::models::Version;

/// 18-bit version word, or `None` below version 7
pub fn encode_version_info(version: Version) -> Option<u32> {
    version
        .has_version_info()
        .then(|| VERSION_BCH.encode(u32::from(version.number())))
}

/// Version whose word is within 3 bit errors of `word`
pub fn decode_version_info(word: u32) -> Option<Version> {
    let number = VERSION_BCH.decode_nearest(word, 0, 7..=40, 3)?;
    Version::new(number as u8)
}
