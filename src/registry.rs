//! Ordered codec registry and dispatch entry points.

use alloc::boxed::Box;
use alloc::vec::Vec;

use enough::Stop;

use crate::bmp::BmpCodec;
use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::stream::ByteCursor;

/// Ordered set of registered codecs.
///
/// Registration is append-only and meant to happen once at startup; after
/// that the registry is read-only, so sniffing and dispatch through a shared
/// `&CodecRegistry` are safe from any number of threads. When two codecs
/// could both claim a stream, the one registered first wins — ambiguous
/// formats must be ordered deliberately at registration time.
pub struct CodecRegistry {
    codecs: Vec<Box<dyn ImageCodec>>,
}

impl CodecRegistry {
    /// Empty registry — caller registers every codec.
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Registry with the built-in codecs: BMP first, then the compiled-in
    /// external adapters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BmpCodec));
        #[cfg(feature = "png")]
        registry.register(Box::new(crate::codecs::png::PngCodec));
        #[cfg(feature = "webp-tools")]
        registry.register(Box::new(crate::codecs::webp::WebPCodec::default()));
        registry
    }

    /// Append a codec. Later registrations lose sniffing ties.
    pub fn register(&mut self, codec: Box<dyn ImageCodec>) {
        self.codecs.push(codec);
    }

    /// Registered codecs, in registration order.
    pub fn codecs(&self) -> impl Iterator<Item = &dyn ImageCodec> {
        self.codecs.iter().map(AsRef::as_ref)
    }

    /// Codec with the given display name, if registered.
    pub fn find_by_name(&self, name: &str) -> Option<&dyn ImageCodec> {
        self.codecs().find(|c| c.format_name() == name)
    }

    /// First registered codec whose sniff accepts the stream.
    ///
    /// The cursor position is restored between probes; on return it sits
    /// after the bytes the winning sniff consumed (or wherever the last
    /// failed probe left it) — callers wanting to decode must reset it.
    pub fn find_for_stream(&self, cursor: &mut ByteCursor<'_>) -> Option<&dyn ImageCodec> {
        let start = cursor.position();
        for codec in self.codecs() {
            // Probing cannot fail: start is a position we already held.
            let _ = cursor.set_position(start);
            if codec.can_understand(cursor) {
                return Some(codec);
            }
        }
        None
    }

    /// First registered codec claiming the path's extension
    /// (case-insensitive). Independent of sniffing.
    pub fn find_for_extension(&self, path: &str) -> Option<&dyn ImageCodec> {
        self.codecs().find(|c| c.uses_file_extension(path))
    }

    /// Sniff out a codec for the stream and decode with it.
    ///
    /// The detected codec sees the cursor rewound to the start of the image
    /// payload (the position at entry).
    pub fn load_from_cursor(
        &self,
        cursor: &mut ByteCursor<'_>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError> {
        let start = cursor.position();
        let codec = self
            .find_for_stream(cursor)
            .ok_or(CodecError::NoMatchingCodec)?;
        cursor.set_position(start)?;
        codec.decode_image(cursor, limits, stop)
    }

    /// Decode an in-memory image file.
    pub fn load_from_bytes(
        &self,
        data: &[u8],
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError> {
        self.load_from_cursor(&mut ByteCursor::new(data), limits, stop)
    }

    /// Read and decode an image file from disk.
    #[cfg(feature = "std")]
    pub fn load_from_file(
        &self,
        path: &std::path::Path,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError> {
        let data = std::fs::read(path)
            .map_err(|e| CodecError::InvalidData(alloc::format!("cannot read file: {e}")))?;
        self.load_from_bytes(&data, limits, stop)
    }

    /// Encode with an explicitly chosen codec.
    ///
    /// Saving never auto-selects a format — the caller's intent would be
    /// ambiguous.
    pub fn save_as(
        &self,
        codec: &dyn ImageCodec,
        image: &Image,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, CodecError> {
        codec.write_image(image, stop)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
