//! In-memory pixel buffer.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::color::Color;
use crate::error::CodecError;
use crate::pixel::PixelFormat;

/// A rectangular grid of pixels in one of the [`PixelFormat`] layouts.
///
/// The backing store is contiguous and unpadded: each row occupies exactly
/// `width * bytes_per_pixel` bytes. Wire-level row padding is a codec-internal
/// concept and never appears here. Rows are stored top-down.
///
/// An `Image` returned by a decoder is always fully decoded — failures are
/// reported as [`CodecError`], never as a partially filled buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Allocate a zero-filled image.
    ///
    /// Fails with [`CodecError::InvalidDimensions`] when either dimension is
    /// zero.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidDimensions { width, height });
        }
        // Bound the pixel count against the widest layout (4 bytes) so that
        // a later `converted_to` can never overflow the byte length either.
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .filter(|px| px.checked_mul(4).is_some())
            .ok_or(CodecError::InvalidDimensions { width, height })?;
        let len = pixels * format.bytes_per_pixel();
        Ok(Self {
            format,
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row of the backing store (no padding).
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// The whole backing store, rows top-down.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// One row's backing bytes.
    pub fn row(&self, y: u32) -> Result<&[u8], CodecError> {
        self.check_bounds(0, y)?;
        let stride = self.row_stride();
        let start = y as usize * stride;
        Ok(&self.data[start..start + stride])
    }

    /// One row's backing bytes, mutable.
    pub fn row_mut(&mut self, y: u32) -> Result<&mut [u8], CodecError> {
        self.check_bounds(0, y)?;
        let stride = self.row_stride();
        let start = y as usize * stride;
        Ok(&mut self.data[start..start + stride])
    }

    /// Read one pixel. Formats without alpha read back `a = 255`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Color, CodecError> {
        self.check_bounds(x, y)?;
        let off = self.offset(x, y);
        Ok(match self.format {
            PixelFormat::Gray => {
                let g = self.data[off];
                Color::rgb(g, g, g)
            }
            PixelFormat::Rgb => Color::rgb(self.data[off], self.data[off + 1], self.data[off + 2]),
            PixelFormat::Argb => Color::argb(
                self.data[off],
                self.data[off + 1],
                self.data[off + 2],
                self.data[off + 3],
            ),
        })
    }

    /// Write one pixel. Formats without alpha ignore the alpha channel; Gray
    /// stores the BT.601 luma of the color channels.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), CodecError> {
        self.check_bounds(x, y)?;
        let off = self.offset(x, y);
        match self.format {
            PixelFormat::Gray => self.data[off] = color.luma(),
            PixelFormat::Rgb => {
                self.data[off] = color.r;
                self.data[off + 1] = color.g;
                self.data[off + 2] = color.b;
            }
            PixelFormat::Argb => {
                self.data[off] = color.a;
                self.data[off + 1] = color.r;
                self.data[off + 2] = color.g;
                self.data[off + 3] = color.b;
            }
        }
        Ok(())
    }

    /// A new image in `format`, converted pixel by pixel.
    ///
    /// Up-conversion is lossless (alpha filled with 255); down-conversion
    /// drops alpha, and conversion to Gray stores luma. The source is never
    /// mutated.
    pub fn converted_to(&self, format: PixelFormat) -> Image {
        if format == self.format {
            return self.clone();
        }
        let mut out = Image {
            format,
            width: self.width,
            height: self.height,
            // `new` bounded the pixel count against the 4-byte layout, so
            // this length cannot overflow for any target format.
            data: vec![0u8; self.width as usize * self.height as usize * format.bytes_per_pixel()],
        };
        let src_bpp = self.format.bytes_per_pixel();
        let dst_bpp = format.bytes_per_pixel();
        for (src_row, dst_row) in self
            .data
            .chunks_exact(self.width as usize * src_bpp)
            .zip(out.data.chunks_exact_mut(self.width as usize * dst_bpp))
        {
            for (src, dst) in src_row
                .chunks_exact(src_bpp)
                .zip(dst_row.chunks_exact_mut(dst_bpp))
            {
                let c = match self.format {
                    PixelFormat::Gray => Color::rgb(src[0], src[0], src[0]),
                    PixelFormat::Rgb => Color::rgb(src[0], src[1], src[2]),
                    PixelFormat::Argb => Color::argb(src[0], src[1], src[2], src[3]),
                };
                match format {
                    PixelFormat::Gray => dst[0] = c.luma(),
                    PixelFormat::Rgb => dst.copy_from_slice(&[c.r, c.g, c.b]),
                    PixelFormat::Argb => dst.copy_from_slice(&[c.a, c.r, c.g, c.b]),
                }
            }
        }
        out
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.format.bytes_per_pixel()
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), CodecError> {
        if x >= self.width || y >= self.height {
            return Err(CodecError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Reinterpret the backing store as a typed pixel slice.
    ///
    /// Returns [`CodecError::UnsupportedEncoding`] if `P` does not match this
    /// image's [`PixelFormat`].
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: ImagePixel>(&self) -> Result<&[P], CodecError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if P::format() != self.format {
            return Err(CodecError::UnsupportedEncoding(alloc::format!(
                "typed view {:?} does not match image format {:?}",
                P::format(),
                self.format
            )));
        }
        Ok(self.data.as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: ImagePixel>(&self) -> Result<imgref::ImgRef<'_, P>, CodecError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Typed pixel types that correspond to a [`PixelFormat`].
#[cfg(feature = "rgb")]
pub trait ImagePixel: Copy {
    fn format() -> PixelFormat;
}

#[cfg(feature = "rgb")]
impl ImagePixel for rgb::alt::Gray<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Gray
    }
}

#[cfg(feature = "rgb")]
impl ImagePixel for rgb::RGB<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Rgb
    }
}

#[cfg(feature = "rgb")]
impl ImagePixel for rgb::alt::ARGB<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Argb
    }
}
