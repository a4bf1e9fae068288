//! Symbols rendered to greyscale and read by an independent decoder (rqrr)

use qr_forge::{ECLevel, EncodeOptions, QrCode, encode, encode_with_options};

const MODULE_PX: usize = 5;
const QUIET_ZONE: usize = 4;

/// Decode `qr` with rqrr, returning (version, mask, content)
fn read_with_rqrr(qr: &QrCode) -> (usize, u16, String) {
    let side = (qr.size() + 2 * QUIET_ZONE) * MODULE_PX;
    let mut image = rqrr::PreparedImage::prepare_from_greyscale(side, side, |x, y| {
        let mx = (x / MODULE_PX).checked_sub(QUIET_ZONE);
        let my = (y / MODULE_PX).checked_sub(QUIET_ZONE);
        match (mx, my) {
            (Some(mx), Some(my)) if mx < qr.size() && my < qr.size() && qr.get(mx, my) => 0,
            _ => 255,
        }
    });
    let grids = image.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one symbol");
    let (meta, content) = grids[0].decode().expect("rqrr failed to decode");
    (meta.version.0, meta.mask, content)
}

#[test]
fn test_rqrr_reads_alphanumeric_symbol() {
    let qr = encode("HELLO WORLD", ECLevel::Q).unwrap();
    let (version, mask, content) = read_with_rqrr(&qr);
    assert_eq!(content, "HELLO WORLD");
    assert_eq!(version, 1);
    assert_eq!(mask, u16::from(qr.mask_pattern().id()));
}

#[test]
fn test_rqrr_reads_url_at_every_level() {
    let link = "https://example.com/path?query=1";
    for level in ECLevel::ALL {
        let qr = encode(link, level).unwrap();
        let (version, _, content) = read_with_rqrr(&qr);
        assert_eq!(content, link, "level {level}");
        assert_eq!(version, usize::from(qr.version().number()));
    }
}

#[test]
fn test_rqrr_reads_multi_block_symbol() {
    // 200 bytes at M needs version 10: five blocks of two lengths
    let text = "x".repeat(200);
    let qr = encode(&text, ECLevel::M).unwrap();
    assert_eq!(qr.version().number(), 10);
    let (version, _, content) = read_with_rqrr(&qr);
    assert_eq!(version, 10);
    assert_eq!(content, text);
}

#[test]
fn test_rqrr_reads_forced_masks() {
    for mask in qr_forge::MaskPattern::ALL {
        let options = EncodeOptions::new(ECLevel::M).with_mask(mask);
        let qr = encode_with_options("01234567", &options).unwrap();
        let (_, read_mask, content) = read_with_rqrr(&qr);
        assert_eq!(content, "01234567");
        assert_eq!(read_mask, u16::from(mask.id()));
    }
}
