//! Native BMP image format decoder and encoder (internal).
//!
//! Use the top-level [`crate::DecodeRequest`] and [`crate::EncodeRequest`].

mod decode;
mod encode;

use alloc::vec::Vec;

use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::ImageError;
use crate::limits::{self, Limits};

/// Decode BMP data into the canonical RGBA buffer.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, ImageError> {
    let mut dec = decode::BmpDecoder::new(data)?;
    let (width, height) = (dec.width(), dec.height());
    limits::check_dimensions(width, height, limits)?;
    let out_bytes = width as usize * height as usize * 4;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;
    let pixels = dec.decode_pixels(stop)?;
    Ok(DecodeOutput::new(pixels, width, height))
}

/// Probe a BMP header for dimensions without decoding pixel data.
pub(crate) fn probe(data: &[u8]) -> Result<(u32, u32), ImageError> {
    let header = decode::parse_header(data)?;
    Ok((header.width, header.height))
}

/// Encode a canonical RGBA buffer to a complete BMP file.
pub(crate) fn encode(
    rgba: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageError> {
    encode::encode_bmp(rgba, width, height, stop)
}
