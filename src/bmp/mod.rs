//! Self-contained BMP codec: uncompressed 8/24/32-bit decode, 32-bit encode.

mod decode;
mod encode;

use alloc::vec::Vec;
use enough::Stop;

use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::stream::ByteCursor;

/// Windows bitmap codec.
///
/// Decodes uncompressed BMP files at 8 (paletted), 24, and 32 bits per pixel,
/// honoring both bottom-up and top-down row order. Encoding always writes a
/// 32-bit ARGB bottom-up file, regardless of the source image format.
#[derive(Clone, Copy, Debug, Default)]
pub struct BmpCodec;

impl ImageCodec for BmpCodec {
    fn format_name(&self) -> &'static str {
        "BMP"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["bmp"]
    }

    fn can_understand(&self, cursor: &mut ByteCursor<'_>) -> bool {
        matches!(cursor.read_fixed::<2>(), Ok(magic) if magic == *b"BM")
    }

    fn decode_image(
        &self,
        cursor: &mut ByteCursor<'_>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError> {
        decode::decode_bmp(cursor, limits, stop)
    }

    fn write_image(&self, image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError> {
        encode::encode_bmp(image, stop)
    }
}
