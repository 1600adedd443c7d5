//! Hand-built BMP byte streams exercising header parsing, row order,
//! stride padding, palettes and the malformed-input paths.

use enough::Unstoppable;
use rasterdex::*;

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Builds a complete BMP stream with a 40-byte info header. The pixel data
/// offset is derived from the palette length unless overridden.
fn build_bmp(
    width: i32,
    height: i32,
    planes: u16,
    bpp: u16,
    compression: u32,
    colours_used: u32,
    palette: &[u8],
    pixel_data: &[u8],
) -> Vec<u8> {
    let data_offset = 54 + palette.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    push_u32(&mut out, data_offset + pixel_data.len() as u32); // file size
    push_u32(&mut out, 0); // reserved
    push_u32(&mut out, data_offset);
    push_u32(&mut out, 40); // info header size
    push_i32(&mut out, width);
    push_i32(&mut out, height);
    push_u16(&mut out, planes);
    push_u16(&mut out, bpp);
    push_u32(&mut out, compression);
    push_u32(&mut out, pixel_data.len() as u32); // image size
    push_i32(&mut out, 2835); // x pixels per metre
    push_i32(&mut out, 2835); // y pixels per metre
    push_u32(&mut out, colours_used);
    push_u32(&mut out, 0); // important colours
    out.extend_from_slice(palette);
    out.extend_from_slice(pixel_data);
    out
}

fn decode_bmp(data: &[u8]) -> Result<Image, CodecError> {
    BmpCodec.decode_image(&mut ByteCursor::new(data), None, &Unstoppable)
}

// ── Row order and stride ────────────────────────────────────────────

#[test]
fn bottom_up_2x2_24bit_with_stride_padding() {
    // 2x2 at 24bpp: 6 payload bytes per row padded to an 8-byte stride.
    // Rows are stored bottom-up, pixels as B,G,R.
    let pixel_data = [
        1, 2, 3, 4, 5, 6, 0, 0, // file row 0 -> buffer row 1
        7, 8, 9, 10, 11, 12, 0, 0, // file row 1 -> buffer row 0
    ];
    let img = decode_bmp(&build_bmp(2, 2, 1, 24, 0, 0, &[], &pixel_data)).unwrap();

    assert_eq!(img.format(), PixelFormat::Rgb);
    assert_eq!(img.pixel(0, 0).unwrap(), Color::rgb(9, 8, 7));
    assert_eq!(img.pixel(1, 0).unwrap(), Color::rgb(12, 11, 10));
    assert_eq!(img.pixel(0, 1).unwrap(), Color::rgb(3, 2, 1));
    assert_eq!(img.pixel(1, 1).unwrap(), Color::rgb(6, 5, 4));
}

#[test]
fn negative_height_means_top_down() {
    // 1x10 at 24bpp, stride 4; row r carries blue channel r.
    let mut pixel_data = Vec::new();
    for r in 0..10u8 {
        pixel_data.extend_from_slice(&[r, 0, 0, 0]);
    }

    let top_down = decode_bmp(&build_bmp(1, -10, 1, 24, 0, 0, &[], &pixel_data)).unwrap();
    assert_eq!(top_down.height(), 10);
    for r in 0..10 {
        assert_eq!(top_down.pixel(0, r).unwrap().b, r as u8);
    }

    let bottom_up = decode_bmp(&build_bmp(1, 10, 1, 24, 0, 0, &[], &pixel_data)).unwrap();
    for r in 0..10 {
        assert_eq!(bottom_up.pixel(0, 9 - r).unwrap().b, r as u8);
    }
}

#[test]
fn bit_depth_selects_pixel_format() {
    let rgb = decode_bmp(&build_bmp(1, 1, 1, 24, 0, 0, &[], &[10, 20, 30, 0])).unwrap();
    assert_eq!(rgb.format(), PixelFormat::Rgb);

    let argb = decode_bmp(&build_bmp(1, 1, 1, 32, 0, 0, &[], &[10, 20, 30, 40])).unwrap();
    assert_eq!(argb.format(), PixelFormat::Argb);
    // 32-bit pixels are stored B,G,R,A.
    assert_eq!(argb.pixel(0, 0).unwrap(), Color::argb(40, 30, 20, 10));
}

// ── Palettes ────────────────────────────────────────────────────────

fn gradient_palette(entries: usize) -> Vec<u8> {
    let mut palette = Vec::with_capacity(entries * 4);
    for i in 0..entries {
        // B, G, R, reserved
        palette.extend_from_slice(&[i as u8, 0, 255 - i as u8, 0]);
    }
    palette
}

#[test]
fn zero_colours_used_means_full_256_palette() {
    let palette = gradient_palette(256);
    // 4x1 at 8bpp, stride 4.
    let indices = [0u8, 1, 255, 128];
    let img = decode_bmp(&build_bmp(4, 1, 1, 8, 0, 0, &palette, &indices)).unwrap();

    assert_eq!(img.format(), PixelFormat::Rgb);
    assert_eq!(img.pixel(0, 0).unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(img.pixel(1, 0).unwrap(), Color::rgb(254, 0, 1));
    assert_eq!(img.pixel(2, 0).unwrap(), Color::rgb(0, 0, 255));
    assert_eq!(img.pixel(3, 0).unwrap(), Color::rgb(127, 0, 128));
}

#[test]
fn index_beyond_declared_palette_resolves_to_black() {
    let palette = gradient_palette(16);
    let indices = [3u8, 200, 0, 0];
    let img = decode_bmp(&build_bmp(4, 1, 1, 8, 0, 16, &palette, &indices)).unwrap();

    assert_eq!(img.pixel(0, 0).unwrap(), Color::rgb(252, 0, 3));
    assert_eq!(img.pixel(1, 0).unwrap(), Color::rgb(0, 0, 0));
}

#[test]
fn oversized_palette_count_is_rejected() {
    let palette = gradient_palette(256);
    let err = decode_bmp(&build_bmp(4, 1, 1, 8, 0, 300, &palette, &[0, 0, 0, 0])).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedEncoding(_)));
}

#[test]
fn truncated_palette_is_a_truncated_stream() {
    // Header promises 256 entries but the stream ends after 100.
    let palette = gradient_palette(100);
    let data = build_bmp(4, 1, 1, 8, 0, 0, &palette, &[]);
    let err = decode_bmp(&data).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedStream));
}

// ── Unsupported and malformed headers ───────────────────────────────

#[test]
fn compressed_streams_are_rejected() {
    let err = decode_bmp(&build_bmp(1, 1, 1, 24, 1, 0, &[], &[0, 0, 0, 0])).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedEncoding(_)));
}

#[test]
fn unusual_bit_depths_are_rejected() {
    for bpp in [1u16, 4, 16, 48] {
        let err = decode_bmp(&build_bmp(1, 1, 1, bpp, 0, 0, &[], &[0, 0, 0, 0])).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedEncoding(_)), "bpp {bpp}");
    }
}

#[test]
fn nonzero_plane_count_is_rejected() {
    let err = decode_bmp(&build_bmp(1, 1, 2, 24, 0, 0, &[], &[0, 0, 0, 0])).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedEncoding(_)));
}

#[test]
fn degenerate_dimensions_are_rejected() {
    for (w, h) in [(0, 1), (1, 0), (-3, 1)] {
        let err = decode_bmp(&build_bmp(w, h, 1, 24, 0, 0, &[], &[])).unwrap_err();
        assert!(
            matches!(err, CodecError::InvalidDimensions { .. }),
            "{w}x{h}"
        );
    }
}

#[test]
fn truncated_header_is_a_truncated_stream() {
    let full = build_bmp(1, 1, 1, 24, 0, 0, &[], &[0, 0, 0, 0]);
    for len in [0, 1, 2, 14, 30, 53] {
        let err = decode_bmp(&full[..len]).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedStream), "len {len}");
    }
}

#[test]
fn wrong_magic_is_rejected() {
    let mut data = build_bmp(1, 1, 1, 24, 0, 0, &[], &[0, 0, 0, 0]);
    data[0] = b'X';
    assert!(!BmpCodec.can_understand(&mut ByteCursor::new(&data)));
    assert!(decode_bmp(&data).is_err());

    let registry = CodecRegistry::with_builtins();
    let err = registry
        .load_from_bytes(&data, None, &Unstoppable)
        .unwrap_err();
    assert!(matches!(err, CodecError::NoMatchingCodec));
}

#[test]
fn declared_size_is_validated_before_allocation() {
    // Claims 30000x30000 at 24bpp but carries 8 bytes of pixel data. The
    // decoder must reject this from the header alone.
    let data = build_bmp(30000, 30000, 1, 24, 0, 0, &[], &[0; 8]);
    let err = decode_bmp(&data).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedStream));
}

#[test]
fn pixel_data_shorter_than_stride_times_height() {
    // 2x2 at 24bpp needs 16 bytes of pixel data; supply 12.
    let data = build_bmp(2, 2, 1, 24, 0, 0, &[], &[0; 12]);
    let err = decode_bmp(&data).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedStream));
}

#[test]
fn data_offset_is_honoured() {
    // Insert 16 bytes of gap between the headers and the pixel data; the
    // offset field must be followed rather than assuming contiguity.
    let mut data = build_bmp(1, 1, 1, 24, 0, 0, &[], &[]);
    data.extend_from_slice(&[0xAA; 16]);
    data.extend_from_slice(&[50, 60, 70, 0]);
    let offset = 54u32 + 16;
    data[10..14].copy_from_slice(&offset.to_le_bytes());

    let img = decode_bmp(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), Color::rgb(70, 60, 50));
}

#[test]
fn decode_limits_are_enforced() {
    let data = build_bmp(2, 2, 1, 24, 0, 0, &[], &[0; 16]);
    let limits = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    let err = BmpCodec
        .decode_image(&mut ByteCursor::new(&data), Some(&limits), &Unstoppable)
        .unwrap_err();
    assert!(matches!(err, CodecError::LimitExceeded(_)));
}

#[test]
fn decode_at_nonzero_stream_position() {
    // A BMP payload embedded mid-stream: offsets are relative to where the
    // payload begins, not to the start of the outer buffer.
    let bmp = build_bmp(1, 1, 1, 24, 0, 0, &[], &[9, 8, 7, 0]);
    let mut outer = vec![0xFF; 5];
    outer.extend_from_slice(&bmp);

    let mut cursor = ByteCursor::new(&outer);
    cursor.set_position(5).unwrap();
    let img = BmpCodec
        .decode_image(&mut cursor, None, &Unstoppable)
        .unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), Color::rgb(7, 8, 9));
}
