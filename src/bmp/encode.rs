//! BMP encoder: 32-bit ARGB, bottom-up, no palette.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::CodecError;
use crate::image::Image;
use crate::pixel::PixelFormat;

const HEADERS_LEN: usize = 54; // 14-byte file header + 40-byte info header

pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError> {
    let width = image.width();
    let height = image.height();

    // 32-bit rows are always a multiple of 4 bytes, so no row padding.
    let pixel_data_size = (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(CodecError::InvalidDimensions { width, height })?;
    let file_size = pixel_data_size
        .checked_add(HEADERS_LEN)
        .ok_or(CodecError::InvalidDimensions { width, height })?;

    stop.check()?;
    let argb = image.converted_to(PixelFormat::Argb);

    let mut out = Vec::with_capacity(file_size);

    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADERS_LEN as u32).to_le_bytes()); // data offset

    // Info header (BITMAPINFOHEADER)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835i32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    // Rows last-to-first, each pixel as B,G,R,A.
    for y in (0..height).rev() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = argb.row(y)?;
        for px in row.chunks_exact(4) {
            let [a, r, g, b] = [px[0], px[1], px[2], px[3]];
            out.extend_from_slice(&[b, g, r, a]);
        }
    }

    Ok(out)
}
