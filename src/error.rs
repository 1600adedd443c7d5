use alloc::string::String;
use enough::StopReason;

/// Errors from codec dispatch, decoding, and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("no registered codec recognizes this data")]
    NoMatchingCodec,

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("invalid image data: {0}")]
    InvalidData(String),

    #[error("the {0} codec does not support encoding")]
    EncodeUnsupported(&'static str),

    #[error("unexpected end of input")]
    TruncatedStream,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for CodecError {
    fn from(r: StopReason) -> Self {
        CodecError::Cancelled(r)
    }
}
