//! Remove the mask pattern from data modules.

use crate::encoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};

/// Unmask QR code matrix by XORing with mask pattern
pub fn unmask(matrix: &mut BitMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let width = matrix.width();
    let height = matrix.height();

    for y in 0..height {
        for x in 0..width {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_unmask() {
        let mut matrix = BitMatrix::new(21, 21);
        matrix.set(10, 10, true);
        matrix.set(10, 11, true);

        let func = FunctionMask::new(Version::MIN);
        unmask(&mut matrix, MaskPattern::Pattern0, &func);

        // Pattern0: (i + j) % 2 == 0
        assert!(!matrix.get(10, 10));
        assert!(matrix.get(10, 11));
        assert!(matrix.get(11, 11));
        // Finder modules are never toggled
        assert!(!matrix.get(0, 0));
    }
}
