//! Decode request builder and the top-level `decode` entry point.

use enough::Stop;

use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::registry::CodecRegistry;

/// Decode `data` with the built-in codecs, auto-detected from magic bytes.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Image, CodecError> {
    DecodeRequest::new(data).decode(stop)
}

/// Image decode request.
///
/// # Example
///
/// ```no_run
/// use rasterdex::DecodeRequest;
/// use enough::Unstoppable;
///
/// let data: &[u8] = &[]; // your image bytes
/// let image = DecodeRequest::new(data).decode(Unstoppable)?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), rasterdex::CodecError>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    registry: Option<&'a CodecRegistry>,
}

impl<'a> DecodeRequest<'a> {
    /// Create a decode request. The format is detected by sniffing in
    /// codec-registration order.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            registry: None,
        }
    }

    /// Set resource limits.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Dispatch through a caller-built registry instead of the built-ins.
    pub fn with_registry(mut self, registry: &'a CodecRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Decode the image.
    pub fn decode(self, stop: impl Stop) -> Result<Image, CodecError> {
        match self.registry {
            Some(registry) => registry.load_from_bytes(self.data, self.limits, &stop),
            None => {
                CodecRegistry::with_builtins().load_from_bytes(self.data, self.limits, &stop)
            }
        }
    }
}
