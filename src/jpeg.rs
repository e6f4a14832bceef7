//! Delegated JPEG codec (`jpeg` feature).
//!
//! Decoding is handled by `jpeg-decoder`, encoding by `jpeg-encoder`; this
//! module normalizes between their pixel formats and the canonical RGBA
//! buffer.

use alloc::string::ToString;
use alloc::vec::Vec;

use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::ImageError;
use crate::limits::{self, Limits};

fn codec_error(detail: impl ToString) -> ImageError {
    ImageError::Codec {
        codec: "JPEG",
        detail: detail.to_string(),
    }
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, ImageError> {
    let mut decoder = jpeg_decoder::Decoder::new(data);
    decoder.read_info().map_err(codec_error)?;
    let info = decoder
        .info()
        .ok_or_else(|| codec_error("missing frame header"))?;
    let width = u32::from(info.width);
    let height = u32::from(info.height);
    limits::check_dimensions(width, height, limits)?;
    let out_bytes = width as usize * height as usize * 4;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let raw = decoder.decode().map_err(codec_error)?;
    stop.check()?;

    let pixel_count = width as usize * height as usize;
    let mut out = Vec::with_capacity(pixel_count * 4);
    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => {
            for px in raw.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        jpeg_decoder::PixelFormat::L8 => {
            for &g in &raw {
                out.extend_from_slice(&[g, g, g, 255]);
            }
        }
        jpeg_decoder::PixelFormat::L16 => {
            // Big-endian 16-bit luma; keep the high byte.
            for px in raw.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[0], px[0], 255]);
            }
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            for px in raw.chunks_exact(4) {
                let k = u32::from(px[3]);
                let r = (u32::from(px[0]) * k / 255) as u8;
                let g = (u32::from(px[1]) * k / 255) as u8;
                let b = (u32::from(px[2]) * k / 255) as u8;
                out.extend_from_slice(&[r, g, b, 255]);
            }
        }
    }

    Ok(DecodeOutput::new(out, width, height))
}

pub(crate) fn encode(
    rgba: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    let (w16, h16) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ImageError::UnsupportedVariant(alloc::format!(
                "JPEG dimensions limited to 65535, got {width}x{height}"
            )));
        }
    };
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
    let encoder = jpeg_encoder::Encoder::new(&mut out, quality.clamp(1, 100));
    encoder
        .encode(&rgba[..expected], w16, h16, jpeg_encoder::ColorType::Rgba)
        .map_err(codec_error)?;
    Ok(out)
}
