/// Packed square-or-rectangular bit matrix; `true` is a dark module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height).div_ceil(8)],
        }
    }

    /// Create an all-light `size` x `size` matrix
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Build a matrix from row-major booleans. Returns `None` when a row has
    /// the wrong length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut matrix = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (x, &dark) in row.iter().enumerate() {
                matrix.set(x, y, dark);
            }
        }
        Some(matrix)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range coordinates read as light
    pub fn get(&self, x: usize, y: usize) -> bool {
        match self.bit_index(x, y) {
            Some((byte, bit)) => (self.data[byte] >> bit) & 1 == 1,
            None => false,
        }
    }

    /// Set bit at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some((byte, bit)) = self.bit_index(x, y) {
            if value {
                self.data[byte] |= 1 << bit;
            } else {
                self.data[byte] &= !(1 << bit);
            }
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some((byte, bit)) = self.bit_index(x, y) {
            self.data[byte] ^= 1 << bit;
        }
    }

    /// Number of dark modules
    pub fn count_dark(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Row `y` as booleans
    pub fn row(&self, y: usize) -> Vec<bool> {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }

    /// Column `x` as booleans
    pub fn column(&self, x: usize) -> Vec<bool> {
        (0..self.height).map(|y| self.get(x, y)).collect()
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn bit_index(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y * self.width + x;
        Some((index / 8, index % 8))
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::square(21);
        assert_eq!(matrix.width(), 21);
        assert_eq!(matrix.height(), 21);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(4, 3));
        assert_eq!(matrix.count_dark(), 1);

        matrix.toggle(3, 4);
        assert!(!matrix.get(3, 4));
        assert_eq!(matrix.count_dark(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true);
        assert!(!matrix.get(10, 10));
        assert_eq!(matrix.count_dark(), 0);
    }

    #[test]
    fn test_rows_and_columns() {
        let rows = vec![vec![true, false, true], vec![false, false, true]];
        let matrix = BitMatrix::from_rows(&rows).unwrap();
        assert_eq!(matrix.width(), 3);
        assert_eq!(matrix.height(), 2);
        assert_eq!(matrix.row(0), rows[0]);
        assert_eq!(matrix.column(2), vec![true, true]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(BitMatrix::from_rows(&rows).is_none());
    }
}
