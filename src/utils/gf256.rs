//! GF(256) arithmetic for QR Reed-Solomon codes.
//!
//! Field generated by the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//! (0x11D) with generator alpha = 2. Log/antilog tables are built at compile
//! time and shared by every encode and decode call.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

const PRIMITIVE: u16 = 0x11D;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    exp[255] = exp[0];
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

/// An element of GF(256).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gf256(u8);

impl Gf256 {
    /// Additive identity
    pub const ZERO: Gf256 = Gf256(0);
    /// Multiplicative identity
    pub const ONE: Gf256 = Gf256(1);
    /// Field generator alpha
    pub const ALPHA: Gf256 = Gf256(2);

    /// Wrap a byte
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw byte value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// alpha^n
    pub fn exp(n: usize) -> Self {
        Self(TABLES.exp[n % 255])
    }

    /// Discrete log base alpha; `None` for zero
    pub fn log(self) -> Option<usize> {
        (self.0 != 0).then(|| TABLES.log[self.0 as usize] as usize)
    }

    /// self^n, with 0^0 = 1
    pub fn pow(self, n: usize) -> Self {
        match self.log() {
            None if n == 0 => Self::ONE,
            None => Self::ZERO,
            Some(l) => Self::exp(l * (n % 255)),
        }
    }

    /// Multiplicative inverse; `None` for zero
    pub fn inverse(self) -> Option<Self> {
        self.log().map(|l| Self::exp(255 - l))
    }

    /// self / rhs; `None` when dividing by zero
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        let inv = rhs.inverse()?;
        Some(self * inv)
    }
}

impl From<u8> for Gf256 {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Gf256> for u8 {
    fn from(value: Gf256) -> Self {
        value.0
    }
}

impl Add for Gf256 {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Gf256 {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for Gf256 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self.log(), rhs.log()) {
            (Some(a), Some(b)) => Self::exp(a + b),
            _ => Self::ZERO,
        }
    }
}

impl MulAssign for Gf256 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_known_values() {
        assert_eq!(Gf256::exp(0).value(), 1);
        assert_eq!(Gf256::exp(8).value(), 29);
        assert_eq!(Gf256::exp(25).value(), 3);
        assert_eq!(Gf256::new(3).log(), Some(25));
        assert_eq!(Gf256::new(2).log(), Some(1));
        assert_eq!(Gf256::ZERO.log(), None);
    }

    #[test]
    fn test_gf256_basic() {
        let a = Gf256::new(0x53);
        assert_eq!(a * Gf256::ZERO, Gf256::ZERO);
        assert_eq!(a * Gf256::ONE, a);
        assert_eq!(a + a, Gf256::ZERO);
        assert_eq!(a.checked_div(a), Some(Gf256::ONE));
        assert_eq!(a.checked_div(Gf256::ZERO), None);
        assert_eq!(Gf256::ZERO.checked_div(a), Some(Gf256::ZERO));
    }

    #[test]
    fn test_every_nonzero_element_has_inverse() {
        for v in 1..=255u8 {
            let x = Gf256::new(v);
            let inv = x.inverse().unwrap();
            assert_eq!(x * inv, Gf256::ONE, "inverse of {v}");
        }
        assert_eq!(Gf256::ZERO.inverse(), None);
    }

    #[test]
    fn test_pow() {
        assert_eq!(Gf256::ALPHA.pow(255), Gf256::ONE);
        assert_eq!(Gf256::ALPHA.pow(256), Gf256::ALPHA);
        assert_eq!(Gf256::ALPHA.pow(260), Gf256::ALPHA.pow(5));
        assert_eq!(Gf256::ZERO.pow(10), Gf256::ZERO);
        assert_eq!(Gf256::ZERO.pow(0), Gf256::ONE);
    }

    #[test]
    fn test_mul_is_distributive() {
        let (a, b, c) = (Gf256::new(7), Gf256::new(200), Gf256::new(91));
        assert_eq!(a * (b + c), a * b + a * c);
    }
}
