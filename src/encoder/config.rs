use std::sync::OnceLock;

use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, Mode, Version};

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

/// Default for [`EncodeOptions::parallel_masks`], read once from `QR_PARALLEL_MASKS`.
pub(crate) fn parallel_masks_default() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", false))
}

/// Per-call encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Requested error correction level
    pub level: ECLevel,
    /// Smallest version to try
    pub min_version: u8,
    /// Largest version to try
    pub max_version: u8,
    /// Force a mode instead of classifying the input
    pub mode: Option<Mode>,
    /// Force a mask instead of scoring all eight
    pub mask: Option<MaskPattern>,
    /// Raise the level while the data still fits the chosen version
    pub boost_error_correction: bool,
    /// Score mask candidates on the rayon pool
    pub parallel_masks: bool,
}

impl EncodeOptions {
    /// Versions 1-10, automatic mode and mask, environment default for parallel search
    pub fn new(level: ECLevel) -> Self {
        Self {
            level,
            min_version: Version::MIN.number(),
            max_version: Version::DEFAULT_MAX.number(),
            mode: None,
            mask: None,
            boost_error_correction: false,
            parallel_masks: parallel_masks_default(),
        }
    }

    /// Smallest version to try
    pub fn with_min_version(mut self, version: u8) -> Self {
        self.min_version = version;
        self
    }

    /// Largest version to try
    pub fn with_max_version(mut self, version: u8) -> Self {
        self.max_version = version;
        self
    }

    /// Force a data mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Force a mask instead of scoring all eight
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Raise the level when the chosen version has room
    pub fn with_boost_error_correction(mut self, boost: bool) -> Self {
        self.boost_error_correction = boost;
        self
    }

    /// Score masks on the rayon pool
    pub fn with_parallel_masks(mut self, parallel: bool) -> Self {
        self.parallel_masks = parallel;
        self
    }

    /// Validated (min, max) version bounds
    pub fn version_bounds(&self) -> Result<(Version, Version), EncodeError> {
        let max = Version::new(self.max_version)
            .ok_or(EncodeError::InvalidVersion(self.max_version))?;
        let min = Version::new(self.min_version)
            .filter(|min| *min <= max)
            .ok_or(EncodeError::InvalidVersion(self.min_version))?;
        Ok((min, max))
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(ECLevel::M)
    }
}
