//! External codec adapters.
//!
//! Each module is a thin boundary shim between the [`crate::ImageCodec`]
//! contract and an external capability — a codec crate or a codec
//! executable. Adapters normalize whatever the external side produces into
//! [`crate::Image`]'s Gray/RGB/ARGB layouts and collapse every external
//! failure into an ordinary [`crate::CodecError`].

#[cfg(feature = "png")]
pub(crate) mod png;

#[cfg(feature = "webp-tools")]
pub(crate) mod webp;

#[cfg(feature = "png")]
pub use png::PngCodec;

#[cfg(feature = "webp-tools")]
pub use webp::WebPCodec;
