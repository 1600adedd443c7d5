//! BMP header parsing and row decoding.
//!
//! Headers are read little-endian, field by field; the in-memory layout of
//! the wire structs never matters. The pixel-data offset field is
//! authoritative for locating rows — parsing position is not.

use alloc::vec;

use enough::Stop;

use crate::color::Color;
use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::PixelFormat;
use crate::stream::ByteCursor;

/// Bytes per wire row, rounded up to a 4-byte boundary.
pub(crate) fn row_stride(bits_per_pixel: u16, width: u32) -> usize {
    (bits_per_pixel as usize * width as usize + 31) / 32 * 4
}

struct BmpHeader {
    /// Absolute offset of pixel data within the BMP payload.
    data_offset: u32,
    width: u32,
    height: u32,
    /// File rows run top-down (header declared a negative height).
    top_down: bool,
    bits_per_pixel: u16,
    colours_used: u32,
}

/// Parse the 14-byte file header and 40-byte info header.
///
/// Advisory fields (file size, resolution, image data size) are consumed but
/// not trusted; the header-size field is informational only.
fn parse_header(cursor: &mut ByteCursor<'_>) -> Result<BmpHeader, CodecError> {
    let magic = cursor.read_fixed::<2>()?;
    if magic != *b"BM" {
        return Err(CodecError::InvalidData(alloc::format!(
            "bad BMP magic: {:02x}{:02x}",
            magic[0],
            magic[1]
        )));
    }

    let _file_size = cursor.read_u32_le()?;
    let _reserved1 = cursor.read_u16_le()?;
    let _reserved2 = cursor.read_u16_le()?;
    let data_offset = cursor.read_u32_le()?;
    let _header_size = cursor.read_u32_le()?;
    let width = cursor.read_i32_le()?;
    let height = cursor.read_i32_le()?;
    let planes = cursor.read_u16_le()?;
    let bits_per_pixel = cursor.read_u16_le()?;
    let compression = cursor.read_u32_le()?;
    let _image_data_size = cursor.read_u32_le()?;
    let _h_pixels_per_meter = cursor.read_i32_le()?;
    let _v_pixels_per_meter = cursor.read_i32_le()?;
    let colours_used = cursor.read_u32_le()?;
    let _colours_required = cursor.read_u32_le()?;

    if compression != 0 {
        return Err(CodecError::UnsupportedEncoding(alloc::format!(
            "BMP compression scheme {compression} not supported"
        )));
    }
    if !matches!(bits_per_pixel, 8 | 24 | 32) {
        return Err(CodecError::UnsupportedEncoding(alloc::format!(
            "BMP bit depth {bits_per_pixel} not supported"
        )));
    }
    if planes != 1 {
        return Err(CodecError::UnsupportedEncoding(alloc::format!(
            "BMP planes field is {planes}, expected 1"
        )));
    }
    if width <= 0 || height == 0 {
        return Err(CodecError::InvalidDimensions {
            width: width.unsigned_abs(),
            height: height.unsigned_abs(),
        });
    }

    Ok(BmpHeader {
        data_offset,
        width: width as u32,
        height: height.unsigned_abs(),
        top_down: height < 0,
        bits_per_pixel,
        colours_used,
    })
}

/// Load the color table for an 8-bit BMP.
///
/// Entries are 4 bytes `B,G,R,reserved` and become opaque colors. A zero
/// declared count means 256. Table slots past the declared count stay opaque
/// black, so a stray pixel index can never read out of bounds.
fn load_palette(
    cursor: &mut ByteCursor<'_>,
    colours_used: u32,
) -> Result<[Color; 256], CodecError> {
    let count = if colours_used == 0 { 256 } else { colours_used };
    if count > 256 {
        return Err(CodecError::UnsupportedEncoding(alloc::format!(
            "BMP palette declares {count} entries, max is 256"
        )));
    }

    let mut palette = [Color::rgb(0, 0, 0); 256];
    for entry in palette.iter_mut().take(count as usize) {
        let [b, g, r, _] = cursor.read_fixed::<4>()?;
        *entry = Color::rgb(r, g, b);
    }
    Ok(palette)
}

pub(crate) fn decode_bmp(
    cursor: &mut ByteCursor<'_>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, CodecError> {
    // The data-offset field is relative to the payload start, which need not
    // be position 0 of the underlying slice.
    let base = cursor.position();
    let header = parse_header(cursor)?;

    let palette = if header.bits_per_pixel == 8 {
        Some(load_palette(cursor, header.colours_used)?)
    } else {
        None
    };

    let stride = row_stride(header.bits_per_pixel, header.width);
    let pixel_data_start = base
        .checked_add(header.data_offset as usize)
        .ok_or(CodecError::TruncatedStream)?;
    let pixel_data_len = stride
        .checked_mul(header.height as usize)
        .ok_or(CodecError::InvalidDimensions {
            width: header.width,
            height: header.height,
        })?;

    // Validate the declared geometry against what the stream actually holds
    // before allocating anything, so a forged header cannot force a huge
    // allocation.
    if pixel_data_start
        .checked_add(pixel_data_len)
        .is_none_or(|end| end > cursor.data().len())
    {
        return Err(CodecError::TruncatedStream);
    }

    let format = match header.bits_per_pixel {
        32 => PixelFormat::Argb,
        _ => PixelFormat::Rgb,
    };
    if let Some(limits) = limits {
        limits.check_decode(
            header.width,
            header.height,
            header.width as usize * header.height as usize * format.bytes_per_pixel(),
        )?;
    }
    stop.check()?;

    let mut image = Image::new(format, header.width, header.height)?;
    cursor.set_position(pixel_data_start)?;

    let mut row_buf = vec![0u8; stride];
    for r in 0..header.height {
        if r % 16 == 0 {
            stop.check()?;
        }
        cursor.read_exact(&mut row_buf)?;

        let dst_y = if header.top_down {
            r
        } else {
            header.height - 1 - r
        };
        let dst = image.row_mut(dst_y)?;

        match header.bits_per_pixel {
            8 => {
                let palette = palette.as_ref().ok_or(CodecError::TruncatedStream)?;
                for (idx, out) in row_buf
                    .iter()
                    .take(header.width as usize)
                    .zip(dst.chunks_exact_mut(3))
                {
                    let entry = palette[usize::from(*idx)];
                    out.copy_from_slice(&[entry.r, entry.g, entry.b]);
                }
            }
            24 => {
                for (src, out) in row_buf.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
                    out.copy_from_slice(&[src[2], src[1], src[0]]);
                }
            }
            32 => {
                for (src, out) in row_buf.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
                    out.copy_from_slice(&[src[3], src[2], src[1], src[0]]);
                }
            }
            _ => unreachable!("depth validated during header parse"),
        }
    }

    Ok(image)
}
