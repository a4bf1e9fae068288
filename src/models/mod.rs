/// Packed module matrix
pub mod matrix;
/// Symbol parameters and the finished code
pub mod qr_code;

pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, MaskPattern, Mode, QrCode, Version};
