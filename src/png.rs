//! Delegated PNG codec (`png` feature).
//!
//! Decoding and encoding are handled by the `png` crate; this module only
//! normalizes between PNG color types and the canonical RGBA buffer.

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::ImageError;
use crate::limits::{self, Limits};

fn codec_error(detail: impl ToString) -> ImageError {
    ImageError::Codec {
        codec: "PNG",
        detail: detail.to_string(),
    }
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, ImageError> {
    let mut decoder = png::Decoder::new(data);
    // Expand palettes and strip 16-bit depth so every output is 8-bit
    // gray / gray+alpha / RGB / RGBA.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(codec_error)?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    limits::check_dimensions(width, height, limits)?;
    let out_bytes = width as usize * height as usize * 4;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let mut raw = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut raw).map_err(codec_error)?;
    raw.truncate(info.buffer_size());
    stop.check()?;

    let pixel_count = width as usize * height as usize;
    let pixels = match info.color_type {
        png::ColorType::Rgba => raw,
        png::ColorType::Rgb => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for px in raw.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
            out
        }
        png::ColorType::Grayscale => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for &g in &raw {
                out.extend_from_slice(&[g, g, g, 255]);
            }
            out
        }
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for px in raw.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
            out
        }
        other => {
            return Err(ImageError::UnsupportedVariant(alloc::format!(
                "PNG color type {other:?} after normalization"
            )));
        }
    };

    Ok(DecodeOutput::new(pixels, width, height))
}

pub(crate) fn encode(
    rgba: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(ImageError::DimensionsTooLarge { width, height })?;
    if rgba.len() < expected {
        return Err(ImageError::BufferTooSmall {
            needed: expected,
            actual: rgba.len(),
        });
    }
    stop.check()?;

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(codec_error)?;
    writer
        .write_image_data(&rgba[..expected])
        .map_err(codec_error)?;
    writer.finish().map_err(codec_error)?;
    Ok(out)
}
