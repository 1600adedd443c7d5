//! The codec capability contract.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::stream::ByteCursor;

/// Capability set every image format handler implements: name, extension
/// match, stream sniffing, decode, and encode.
///
/// Implementations are stateless beyond plain configuration fields (e.g. an
/// encoder quality knob), so every method is reentrant and a shared instance
/// may be used from multiple threads. Mutating a codec's configuration while
/// another thread encodes with it is the caller's responsibility to avoid.
pub trait ImageCodec: Send + Sync {
    /// Display name of the format, e.g. `"BMP"`.
    fn format_name(&self) -> &'static str;

    /// File-extension tokens this format claims, lowercase, without the dot.
    fn file_extensions(&self) -> &'static [&'static str];

    /// Whether `path` ends in one of this format's extensions
    /// (case-insensitive). Independent of sniffing.
    fn uses_file_extension(&self, path: &str) -> bool {
        let ext = match path.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => return false,
        };
        self.file_extensions()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }

    /// Sniff the stream for this format's magic bytes.
    ///
    /// Reads only the bounded prefix needed to decide and leaves the cursor
    /// positioned after those bytes; callers planning to re-decode must reset
    /// the position themselves. Never fails — any ambiguity (including a
    /// short stream) is `false`.
    fn can_understand(&self, cursor: &mut ByteCursor<'_>) -> bool;

    /// Decode the stream into an [`Image`].
    ///
    /// The cursor is positioned at the start of the image payload. On any
    /// failure the error names the cause; no partially decoded image is ever
    /// returned.
    fn decode_image(
        &self,
        cursor: &mut ByteCursor<'_>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError>;

    /// Encode `image` into this format's byte stream.
    ///
    /// Decode-only codecs return [`CodecError::EncodeUnsupported`]
    /// permanently; that is an expected codec variant, not a registry error.
    fn write_image(&self, image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError>;
}
