//! Path-based convenience layer (`std` feature): read a file of any
//! supported type into a caller-chosen pixel layout, or write one out,
//! with the output format inferred from the file suffix.

use std::path::Path;

use enough::Unstoppable;

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::ImageError;
use crate::format::{FormattedImage, PixelFormat, Samples};

/// Read an image file, detecting its type from the magic bytes, and return
/// its pixels in the layout described by `fmt`.
///
/// The default `fmt` yields the canonical interleaved row-major RGBA-u8
/// buffer. The caller owns the returned buffer; nothing is cached.
pub fn read_image(path: impl AsRef<Path>, fmt: &PixelFormat) -> Result<FormattedImage, ImageError> {
    let data = std::fs::read(path)?;
    DecodeRequest::new(&data).decode_as(fmt, Unstoppable)
}

/// Write an image file, interpreting `samples` according to `fmt` and
/// selecting the output format from the path suffix (case-insensitively:
/// `.bmp`, `.png`, `.jpg`/`.jpeg`).
///
/// `quality` applies to JPEG output only (0–100). On a write error a
/// partial file may remain; removing it is the caller's concern.
pub fn write_image(
    samples: Samples<'_>,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
    fmt: &PixelFormat,
    quality: u8,
) -> Result<(), ImageError> {
    let path = path.as_ref();
    let name = path.to_str().ok_or_else(|| {
        ImageError::UnsupportedVariant("output path is not valid UTF-8".into())
    })?;
    let request = EncodeRequest::for_path(name)?.with_quality(quality);
    let bytes = request.encode_from(samples, width, height, fmt, Unstoppable)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
