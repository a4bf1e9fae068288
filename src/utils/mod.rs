//! Shared arithmetic helpers
//!
//! - GF(256) field elements backed by static log/antilog tables

/// GF(256) arithmetic for Reed-Solomon encoding and correction
pub mod gf256;

pub use gf256::Gf256;
