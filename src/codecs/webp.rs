//! WebP codec adapter over the `cwebp`/`dwebp` executables.
//!
//! A process-boundary adapter: decode pipes the stream through `dwebp -bmp`
//! and feeds the result to the built-in BMP codec; encode goes the other way
//! through `cwebp`. A missing binary, a non-zero exit, or garbage output all
//! surface as an ordinary [`CodecError`] — never as a process-level fault.

extern crate std;

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use std::path::PathBuf;
use std::process::Command;

use enough::Stop;

use crate::bmp::BmpCodec;
use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::stream::ByteCursor;

/// WebP codec shelling out to the libwebp command-line tools.
#[derive(Clone, Copy, Debug)]
pub struct WebPCodec {
    /// Encode losslessly; when false, `quality` selects the lossy level.
    pub lossless: bool,
    /// Lossy encode quality in 0.0..=1.0. Ignored when `lossless` is set.
    pub quality: f32,
}

impl Default for WebPCodec {
    fn default() -> Self {
        Self {
            lossless: true,
            quality: 0.85,
        }
    }
}

impl WebPCodec {
    pub fn set_quality(&mut self, lossless: bool, quality: f32) {
        self.lossless = lossless;
        self.quality = quality;
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_path(suffix: &str) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(alloc::format!(
        "rasterdex-webp-{}-{n}.{suffix}",
        std::process::id()
    ))
}

fn tool_error(tool: &str, detail: impl core::fmt::Display) -> CodecError {
    CodecError::InvalidData(alloc::format!("failed to run {tool}: {detail}"))
}

/// Run a codec tool, returning the output file's bytes.
fn run_tool(tool: &str, args: &[&std::ffi::OsStr], out_path: &PathBuf) -> Result<Vec<u8>, CodecError> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| tool_error(tool, e))?;
    if !output.status.success() {
        return Err(tool_error(tool, output.status));
    }
    std::fs::read(out_path).map_err(|e| tool_error(tool, e))
}

impl ImageCodec for WebPCodec {
    fn format_name(&self) -> &'static str {
        "WebP"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["webp"]
    }

    fn can_understand(&self, cursor: &mut ByteCursor<'_>) -> bool {
        matches!(
            cursor.read_fixed::<12>(),
            Ok(prefix) if &prefix[0..4] == b"RIFF" && &prefix[8..12] == b"WEBP"
        )
    }

    fn decode_image(
        &self,
        cursor: &mut ByteCursor<'_>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Image, CodecError> {
        let payload = &cursor.data()[cursor.position()..];
        let _ = cursor.set_position(cursor.data().len());
        stop.check()?;

        let in_path = temp_path("webp");
        let out_path = temp_path("bmp");
        std::fs::write(&in_path, payload).map_err(|e| tool_error("dwebp", e))?;

        let result = run_tool(
            "dwebp",
            &[
                in_path.as_os_str(),
                "-bmp".as_ref(),
                "-o".as_ref(),
                out_path.as_os_str(),
            ],
            &out_path,
        );
        let _ = std::fs::remove_file(&in_path);
        let _ = std::fs::remove_file(&out_path);
        let bmp_bytes = result?;

        // dwebp's output goes through the same untrusted-input path as any
        // other BMP stream.
        BmpCodec.decode_image(&mut ByteCursor::new(&bmp_bytes), limits, stop)
    }

    fn write_image(&self, image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError> {
        let bmp_bytes = BmpCodec.write_image(image, stop)?;
        stop.check()?;

        let in_path = temp_path("bmp");
        let out_path = temp_path("webp");
        std::fs::write(&in_path, &bmp_bytes).map_err(|e| tool_error("cwebp", e))?;

        let quality = alloc::format!("{}", (self.quality.clamp(0.0, 1.0) * 100.0).round());
        let mut args: Vec<&std::ffi::OsStr> = Vec::new();
        if self.lossless {
            args.push("-lossless".as_ref());
        } else {
            args.push("-q".as_ref());
            args.push(quality.as_str().as_ref());
        }
        args.extend([
            in_path.as_os_str(),
            "-o".as_ref(),
            out_path.as_os_str(),
        ]);

        let result = run_tool("cwebp", &args, &out_path);
        let _ = std::fs::remove_file(&in_path);
        let _ = std::fs::remove_file(&out_path);
        let webp_bytes = result?;

        if webp_bytes.len() < 12 || &webp_bytes[0..4] != b"RIFF" || &webp_bytes[8..12] != b"WEBP" {
            return Err(CodecError::InvalidData("cwebp produced no WebP data".into()));
        }
        Ok(webp_bytes)
    }
}
