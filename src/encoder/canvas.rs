//! Symbol under construction: function patterns, reserved areas, data placement.

use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::{
    alignment_pattern_positions, format_position_primary, format_position_secondary,
    version_position, zigzag_order,
};
use crate::encoder::version::encode_version_info;
use crate::error::EncodeError;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// State of one module while the symbol is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not yet claimed by a pattern or by data
    #[default]
    Unset,
    /// Finder, separator, timing, alignment, dark module, format or version cell
    Function(bool),
    /// Codeword or remainder bit
    Data(bool),
}

impl Module {
    /// Dark function or data module
    pub fn is_dark(self) -> bool {
        matches!(self, Module::Function(true) | Module::Data(true))
    }

    /// Part of a function pattern or reserved area
    pub fn is_function(self) -> bool {
        matches!(self, Module::Function(_))
    }
}

/// Module grid of one version, indexed by (x, y)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    version: Version,
    size: usize,
    modules: Vec<Module>,
}

impl Canvas {
    /// Blank canvas with every module unset
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            size,
            modules: vec![Module::Unset; size * size],
        }
    }

    /// Canvas with all function patterns drawn and format/version areas reserved
    pub fn with_function_patterns(version: Version) -> Self {
        let mut canvas = Self::new(version);
        canvas.draw_function_patterns();
        canvas
    }

    /// Version being drawn
    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Module {
        self.modules[y * self.size + x]
    }

    fn set(&mut self, x: usize, y: usize, module: Module) {
        self.modules[y * self.size + x] = module;
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.set(x, y, Module::Function(dark));
    }

    fn draw_function_patterns(&mut self) {
        let size = self.size;

        // Timing first; finders and alignment patterns overwrite the ends
        for i in 0..size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }

        self.draw_finder(3, 3);
        self.draw_finder(size - 4, 3);
        self.draw_finder(3, size - 4);

        let align = alignment_pattern_positions(self.version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                let on_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !on_finder {
                    self.draw_alignment(cx, cy);
                }
            }
        }

        // Format areas stay light until the mask is chosen
        for i in 0..15 {
            let (x, y) = format_position_primary(i);
            self.set_function(x, y, false);
            let (x, y) = format_position_secondary(i, size);
            self.set_function(x, y, false);
        }
        self.set_function(8, size - 8, true);

        if self.version.has_version_info() {
            for i in 0..18 {
                let (a, b) = version_position(i, size);
                self.set_function(a, b, false);
                self.set_function(b, a, false);
            }
        }
    }

    /// 7x7 finder centred at (cx, cy) plus its light separator ring
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let (Some(x), Some(y)) = (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                else {
                    continue;
                };
                if x >= self.size || y >= self.size {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set_function(x, y, dist != 2 && dist != 4);
            }
        }
    }

    /// 5x5 alignment pattern centred at (cx, cy)
    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let dist = dx.abs().max(dy.abs());
                let x = cx.wrapping_add_signed(dx);
                let y = cy.wrapping_add_signed(dy);
                self.set_function(x, y, dist != 1);
            }
        }
    }

    /// Modules still free for codewords
    pub fn unset_count(&self) -> usize {
        self.modules.iter().filter(|m| **m == Module::Unset).count()
    }

    /// Write `codewords` MSB first along the zigzag path.
    ///
    /// The stream must fill the data region to the last whole codeword; the
    /// remaining 0-7 remainder modules become light data modules.
    pub fn place_data(&mut self, codewords: &[u8]) -> Result<(), EncodeError> {
        let expected = self.unset_count() / 8;
        if codewords.len() != expected {
            return Err(EncodeError::CapacityMismatch {
                expected,
                actual: codewords.len(),
            });
        }

        let total_bits = codewords.len() * 8;
        let mut bit_index = 0;
        for (x, y) in zigzag_order(self.size) {
            if self.get(x, y) != Module::Unset {
                continue;
            }
            let dark =
                bit_index < total_bits && (codewords[bit_index >> 3] >> (7 - (bit_index & 7))) & 1 == 1;
            self.set(x, y, Module::Data(dark));
            bit_index += 1;
        }
        Ok(())
    }

    /// XOR `mask` onto every data module; function modules are untouched.
    pub fn apply_mask(&mut self, mask: MaskPattern) {
        for y in 0..self.size {
            for x in 0..self.size {
                if let Module::Data(dark) = self.get(x, y) {
                    self.set(x, y, Module::Data(dark ^ mask.is_masked(y, x)));
                }
            }
        }
    }

    /// Write both format information copies for `level` and `mask`.
    pub fn draw_format_info(&mut self, level: ECLevel, mask: MaskPattern) {
        let bits = FormatInfo::new(level, mask).encode();
        for i in 0..15 {
            let dark = (bits >> i) & 1 == 1;
            let (x, y) = format_position_primary(i);
            self.set_function(x, y, dark);
            let (x, y) = format_position_secondary(i, self.size);
            self.set_function(x, y, dark);
        }
    }

    /// Write both version information blocks (versions 7+ only).
    pub fn draw_version_info(&mut self) {
        let Some(bits) = encode_version_info(self.version) else {
            return;
        };
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let (a, b) = version_position(i, self.size);
            self.set_function(a, b, dark);
            self.set_function(b, a, dark);
        }
    }

    /// Packed matrix of the current module colours
    pub fn to_bit_matrix(&self) -> BitMatrix {
        let mut matrix = BitMatrix::square(self.size);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.get(x, y).is_dark() {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::{raw_data_modules, remainder_bits};

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_finder_pattern_shape() {
        let canvas = Canvas::with_function_patterns(v(1));
        let row: Vec<bool> = (0..8).map(|x| canvas.get(x, 0).is_dark()).collect();
        assert_eq!(row, vec![true, true, true, true, true, true, true, false]);
        let row: Vec<bool> = (0..8).map(|x| canvas.get(x, 2).is_dark()).collect();
        assert_eq!(row, vec![true, false, true, true, true, false, true, false]);
        // separator row below the top-left finder
        assert!((0..8).all(|x| canvas.get(x, 7) == Module::Function(false)));
    }

    #[test]
    fn test_timing_and_dark_module() {
        let canvas = Canvas::with_function_patterns(v(2));
        for i in 8..canvas.size() - 8 {
            assert_eq!(canvas.get(i, 6), Module::Function(i % 2 == 0));
            assert_eq!(canvas.get(6, i), Module::Function(i % 2 == 0));
        }
        assert_eq!(canvas.get(8, 4 * 2 + 9), Module::Function(true));
        // alignment pattern centre at (18, 18)
        assert_eq!(canvas.get(18, 18), Module::Function(true));
        assert_eq!(canvas.get(17, 18), Module::Function(false));
        assert_eq!(canvas.get(16, 18), Module::Function(true));
    }

    #[test]
    fn test_unset_count_matches_raw_modules() {
        for n in 1..=40 {
            let canvas = Canvas::with_function_patterns(v(n));
            assert_eq!(canvas.unset_count(), raw_data_modules(v(n)));
        }
    }

    #[test]
    fn test_place_data_fills_region() {
        let version = v(2);
        let mut canvas = Canvas::with_function_patterns(version);
        let codewords = vec![0xFF; raw_data_modules(version) / 8];
        canvas.place_data(&codewords).unwrap();
        assert_eq!(canvas.unset_count(), 0);
        let light_data = canvas.modules.iter().filter(|m| **m == Module::Data(false)).count();
        assert_eq!(light_data, remainder_bits(version));
        // first bit lands bottom-right
        assert_eq!(canvas.get(24, 24), Module::Data(true));
    }

    #[test]
    fn test_place_data_rejects_wrong_length() {
        let mut canvas = Canvas::with_function_patterns(v(1));
        assert_eq!(
            canvas.place_data(&[0; 25]),
            Err(EncodeError::CapacityMismatch {
                expected: 26,
                actual: 25
            })
        );
    }

    #[test]
    fn test_mask_leaves_function_modules() {
        let mut canvas = Canvas::with_function_patterns(v(7));
        canvas
            .place_data(&vec![0; raw_data_modules(v(7)) / 8])
            .unwrap();
        let before = canvas.clone();
        canvas.apply_mask(MaskPattern::Pattern1);
        for y in 0..canvas.size() {
            for x in 0..canvas.size() {
                match before.get(x, y) {
                    Module::Function(_) => assert_eq!(canvas.get(x, y), before.get(x, y)),
                    Module::Data(_) => {
                        assert_eq!(canvas.get(x, y), Module::Data(y % 2 == 0))
                    }
                    Module::Unset => unreachable!(),
                }
            }
        }
    }

    #[test]
    fn test_format_and_version_info_drawn() {
        let mut canvas = Canvas::with_function_patterns(v(7));
        canvas.draw_format_info(ECLevel::M, MaskPattern::Pattern0);
        canvas.draw_version_info();
        let word = 0b101010000010010u16;
        for i in 0..15 {
            let (x, y) = format_position_primary(i);
            assert_eq!(canvas.get(x, y).is_dark(), (word >> i) & 1 == 1);
        }
        let size = canvas.size();
        for i in 0..18 {
            let (a, b) = version_position(i, size);
            let expected = (0x07C94 >> i) & 1 == 1;
            assert_eq!(canvas.get(a, b).is_dark(), expected);
            assert_eq!(canvas.get(b, a).is_dark(), expected);
        }
    }
}
