use crate::encoder::canvas::Canvas;
use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    /// Mark every function module of `version`
    pub fn new(version: Version) -> Self {
        let canvas = Canvas::with_function_patterns(version);
        let size = version.size();
        let mut mask = BitMatrix::square(size);
        for y in 0..size {
            for x in 0..size {
                if canvas.get(x, y).is_function() {
                    mask.set(x, y, true);
                }
            }
        }
        Self { mask, version }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Version the mask was built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// True for modules that never carry data
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Data module coordinates in placement order
    pub fn data_positions(&self) -> Vec<(usize, usize)> {
        zigzag_order(self.size())
            .filter(|&(x, y)| !self.is_function(x, y))
            .collect()
    }

    /// Modules left for codewords and remainder bits
    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_dark()
    }
}

/// Alignment pattern centers for a given version.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;
    let size = version.size();
    let mut positions: Vec<usize> = (0..num_align - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

/// Every module in placement order: two-column strips from the right edge,
/// alternating upward and downward, right column first. Column 6 is skipped.
pub fn zigzag_order(size: usize) -> impl Iterator<Item = (usize, usize)> {
    (8..size)
        .rev()
        .step_by(2)
        .chain([5, 3, 1])
        .flat_map(move |right| {
            let upward = (right + 1) & 2 == 0;
            (0..size).flat_map(move |vert| {
                let y = if upward { size - 1 - vert } else { vert };
                [(right, y), (right - 1, y)]
            })
        })
}

/// (x, y) of format bit `i` (0 = least significant) in the copy around the
/// top-left finder.
pub fn format_position_primary(i: usize) -> (usize, usize) {
    match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    }
}

/// (x, y) of format bit `i` in the copy split between the top-right and
/// bottom-left finders.
pub fn format_position_secondary(i: usize, size: usize) -> (usize, usize) {
    if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    }
}

/// (x, y) of version bit `i` in the top-right block; the bottom-left copy is
/// the transpose.
pub fn version_position(i: usize, size: usize) -> (usize, usize) {
    (size - 11 + i % 3, i / 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::raw_data_modules;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(v(1)).is_empty());
        assert_eq!(alignment_pattern_positions(v(2)), vec![6, 18]);
        assert_eq!(alignment_pattern_positions(v(7)), vec![6, 22, 38]);
        assert_eq!(alignment_pattern_positions(v(10)), vec![6, 28, 50]);
        assert_eq!(alignment_pattern_positions(v(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_pattern_positions(v(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_zigzag_starts_bottom_right() {
        let order: Vec<_> = zigzag_order(21).take(4).collect();
        assert_eq!(order, vec![(20, 20), (19, 20), (20, 19), (19, 19)]);
        // second strip runs downward
        let strip: Vec<_> = zigzag_order(21).skip(42).take(2).collect();
        assert_eq!(strip, vec![(18, 0), (17, 0)]);
        assert!(zigzag_order(21).all(|(x, _)| x != 6));
        assert_eq!(zigzag_order(21).count(), 20 * 21);
    }

    #[test]
    fn test_data_module_count_matches_table() {
        for n in 1..=40 {
            let mask = FunctionMask::new(v(n));
            assert_eq!(mask.data_modules_count(), raw_data_modules(v(n)), "version {n}");
            assert_eq!(mask.data_positions().len(), raw_data_modules(v(n)));
        }
    }

    #[test]
    fn test_format_positions_avoid_timing() {
        for i in 0..15 {
            assert_ne!(format_position_primary(i), (8, 6));
            assert_ne!(format_position_primary(i), (6, 8));
        }
        assert_eq!(format_position_secondary(0, 21), (20, 8));
        assert_eq!(format_position_secondary(14, 21), (8, 20));
    }
}
