//! # rasterdex
//!
//! Extensible image codec registry: sniff an opaque byte stream to identify
//! its format, decode it into an in-memory [`Image`], and encode an [`Image`]
//! back into a format-specific byte stream.
//!
//! ## Built-in codecs
//!
//! - **BMP** — fully self-contained decode (uncompressed 8-bit paletted,
//!   24-bit, 32-bit; bottom-up and top-down) and 32-bit ARGB encode. Always
//!   available.
//! - **PNG** (`png` feature) — adapter over the [`png`] crate.
//! - **WebP** (`webp-tools` feature) — adapter over the `cwebp`/`dwebp`
//!   executables; subprocess failures surface as ordinary decode errors.
//!
//! Additional formats plug in by implementing [`ImageCodec`] and registering
//! the codec on a [`CodecRegistry`]. Sniffing is first-match in registration
//! order.
//!
//! ## Usage
//!
//! ```no_run
//! use rasterdex::{CodecRegistry, DecodeRequest, PixelFormat};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your image bytes
//!
//! // Decode with the built-in codecs
//! let image = DecodeRequest::new(data).decode(Unstoppable)?;
//! println!("{}x{} {:?}", image.width(), image.height(), image.format());
//!
//! // Re-encode as BMP
//! let registry = CodecRegistry::with_builtins();
//! let bmp = registry.find_by_name("BMP").unwrap();
//! let bytes = registry.save_as(bmp, &image, &Unstoppable)?;
//! # Ok::<(), rasterdex::CodecError>(())
//! ```
//!
//! ## Failure model
//!
//! Malformed input is an expected condition, not an exceptional one: every
//! decode path fails fast with a [`CodecError`] and never panics, never
//! returns a partially decoded image, and never allocates storage for
//! dimensions the stream cannot actually back.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod codec;
mod codecs;
mod color;
mod decode;
mod error;
mod image;
mod limits;
mod pixel;
mod registry;
mod stream;

// Re-exports
pub use bmp::BmpCodec;
pub use codec::ImageCodec;
#[cfg(feature = "png")]
pub use codecs::PngCodec;
#[cfg(feature = "webp-tools")]
pub use codecs::WebPCodec;
pub use color::Color;
pub use decode::{decode, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::CodecError;
pub use image::Image;
#[cfg(feature = "rgb")]
pub use image::ImagePixel;
pub use limits::Limits;
pub use pixel::PixelFormat;
pub use registry::CodecRegistry;
pub use stream::ByteCursor;
