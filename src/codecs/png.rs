//! PNG codec adapter over the `png` crate.
//!
//! Requires std (the `png` crate works through `std::io` traits).

extern crate std;

use alloc::vec;
use alloc::vec::Vec;
use std::io::Cursor;
use std::string::ToString;

use enough::Stop;

use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::PixelFormat;
use crate::stream::ByteCursor;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG codec backed by the `png` crate.
///
/// Decodes every 8-bit color type, normalized to this crate's Gray/RGB/ARGB
/// layouts (the library's R,G,B,A byte order is swizzled to A,R,G,B).
/// 16-bit depth is rejected as unsupported.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

fn png_error(e: impl ToString) -> CodecError {
    CodecError::InvalidData(alloc::format!("PNG: {}", e.to_string()))
}

impl ImageCodec for PngCodec {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["png"]
    }

    fn can_understand(&self, cursor: &mut ByteCursor<'_>) -> bool {
        matches!(cursor.read_fixed::<8>(), Ok(sig) if sig == PNG_SIGNATURE)
    }

    fn decode_image(
        &self,
        cursor: &mut ByteCursor<'_>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError> {
        let payload = &cursor.data()[cursor.position()..];
        let _ = cursor.set_position(cursor.data().len());

        let mut decoder = png::Decoder::new(Cursor::new(payload));
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info().map_err(png_error)?;

        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidDimensions { width, height });
        }
        let buffer_size = reader
            .output_buffer_size()
            .ok_or_else(|| CodecError::InvalidData("PNG output buffer size overflow".into()))?;
        if let Some(limits) = limits {
            limits.check_decode(width, height, buffer_size)?;
        }
        stop.check()?;

        let mut raw = vec![0u8; buffer_size];
        let output_info = reader.next_frame(&mut raw).map_err(png_error)?;
        raw.truncate(output_info.buffer_size());

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            return Err(CodecError::UnsupportedEncoding(alloc::format!(
                "PNG bit depth {bit_depth:?} not supported"
            )));
        }
        stop.check()?;

        let (format, channels) = match color_type {
            png::ColorType::Grayscale => (PixelFormat::Gray, 1),
            png::ColorType::GrayscaleAlpha => (PixelFormat::Argb, 2),
            png::ColorType::Rgb => (PixelFormat::Rgb, 3),
            png::ColorType::Rgba => (PixelFormat::Argb, 4),
            other => {
                return Err(CodecError::UnsupportedEncoding(alloc::format!(
                    "PNG color type {other:?} not supported"
                )));
            }
        };
        let expected = width as usize * height as usize * channels;
        if raw.len() < expected {
            return Err(CodecError::TruncatedStream);
        }

        let mut image = Image::new(format, width, height)?;
        for y in 0..height {
            let src = &raw[y as usize * width as usize * channels..][..width as usize * channels];
            let dst = image.row_mut(y)?;
            match color_type {
                png::ColorType::Grayscale | png::ColorType::Rgb => dst.copy_from_slice(src),
                png::ColorType::GrayscaleAlpha => {
                    for (ga, out) in src.chunks_exact(2).zip(dst.chunks_exact_mut(4)) {
                        out.copy_from_slice(&[ga[1], ga[0], ga[0], ga[0]]);
                    }
                }
                png::ColorType::Rgba => {
                    for (rgba, out) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
                        out.copy_from_slice(&[rgba[3], rgba[0], rgba[1], rgba[2]]);
                    }
                }
                _ => unreachable!("color type validated above"),
            }
        }

        Ok(image)
    }

    fn write_image(&self, image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError> {
        stop.check()?;

        let (color_type, bytes) = match image.format() {
            PixelFormat::Gray => (png::ColorType::Grayscale, image.as_bytes().to_vec()),
            PixelFormat::Rgb => (png::ColorType::Rgb, image.as_bytes().to_vec()),
            PixelFormat::Argb => {
                // A,R,G,B buffer order → PNG's R,G,B,A
                let mut rgba = Vec::with_capacity(image.as_bytes().len());
                for px in image.as_bytes().chunks_exact(4) {
                    rgba.extend_from_slice(&[px[1], px[2], px[3], px[0]]);
                }
                (png::ColorType::Rgba, rgba)
            }
        };

        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(png_error)?;
        writer.write_image_data(&bytes).map_err(png_error)?;
        drop(writer);

        Ok(out)
    }
}
