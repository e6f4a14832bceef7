//! Pixel-format conversion engine.
//!
//! Bidirectional transcoder between the canonical buffer (interleaved
//! row-major top-down RGBA-u8) and any layout a [`PixelFormat`] can
//! describe. Both directions are a single loop pair parameterized by three
//! derived quantities (the channel permutation, the pixel stride, and the
//! row stride), so the ordering, layout, and sample-type axes compose
//! without per-combination code.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::ImageError;
use crate::format::{PixelFormat, SampleBuffer, SampleType, Samples};

// Luma coefficients scaled by 1/255 so full white maps to 1.0.
const LUMA_R: f64 = 1.172549019607843070675535e-3;
const LUMA_G: f64 = 2.301960784313725357840079e-3;
const LUMA_B: f64 = 4.470588235294117808150007e-4;

/// Numeric behavior of one destination/source sample type.
trait Sample: Copy + Default {
    fn from_channel(v: u8) -> Self;
    fn to_channel(self) -> u8;
    fn luma(r: u8, g: u8, b: u8) -> Self;
}

impl Sample for u8 {
    fn from_channel(v: u8) -> Self {
        v
    }

    fn to_channel(self) -> u8 {
        self
    }

    fn luma(r: u8, g: u8, b: u8) -> Self {
        (0.299f32 * f32::from(r) + 0.587f32 * f32::from(g) + 0.114f32 * f32::from(b) + 0.5) as u8
    }
}

impl Sample for f32 {
    fn from_channel(v: u8) -> Self {
        f32::from(v) / 255.0
    }

    fn to_channel(self) -> u8 {
        if self < 0.0 {
            0
        } else if self > 1.0 {
            255
        } else {
            (255.0 * self + 0.5) as u8
        }
    }

    fn luma(r: u8, g: u8, b: u8) -> Self {
        (LUMA_R as f32) * f32::from(r) + (LUMA_G as f32) * f32::from(g) + (LUMA_B as f32) * f32::from(b)
    }
}

impl Sample for f64 {
    fn from_channel(v: u8) -> Self {
        f64::from(v) / 255.0
    }

    fn to_channel(self) -> u8 {
        if self < 0.0 {
            0
        } else if self > 1.0 {
            255
        } else {
            (255.0 * self + 0.5) as u8
        }
    }

    fn luma(r: u8, g: u8, b: u8) -> Self {
        LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)
    }
}

fn sample_count(width: u32, height: u32, channels: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(channels))
        .ok_or(ImageError::DimensionsTooLarge { width, height })
}

/// Convert a canonical RGBA-u8 buffer into the layout described by `fmt`.
pub fn from_canonical(
    rgba: &[u8],
    width: u32,
    height: u32,
    fmt: &PixelFormat,
    stop: impl Stop,
) -> Result<SampleBuffer, ImageError> {
    from_canonical_dyn(rgba, width, height, fmt, &stop)
}

pub(crate) fn from_canonical_dyn(
    rgba: &[u8],
    width: u32,
    height: u32,
    fmt: &PixelFormat,
    stop: &dyn Stop,
) -> Result<SampleBuffer, ImageError> {
    let canonical_len = sample_count(width, height, 4)?;
    if rgba.len() < canonical_len {
        return Err(ImageError::BufferTooSmall {
            needed: canonical_len,
            actual: rgba.len(),
        });
    }

    match fmt.sample_type {
        SampleType::U8 => Ok(SampleBuffer::U8(pack(rgba, width, height, fmt, stop)?)),
        SampleType::F32 => Ok(SampleBuffer::F32(pack(rgba, width, height, fmt, stop)?)),
        SampleType::F64 => Ok(SampleBuffer::F64(pack(rgba, width, height, fmt, stop)?)),
    }
}

/// Convert a buffer in the layout described by `fmt` back to canonical
/// RGBA-u8. Grayscale sources replicate into R=G=B; sources without an
/// alpha channel come back fully opaque.
pub fn to_canonical(
    samples: Samples<'_>,
    width: u32,
    height: u32,
    fmt: &PixelFormat,
    stop: impl Stop,
) -> Result<Vec<u8>, ImageError> {
    to_canonical_dyn(samples, width, height, fmt, &stop)
}

pub(crate) fn to_canonical_dyn(
    samples: Samples<'_>,
    width: u32,
    height: u32,
    fmt: &PixelFormat,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageError> {
    if samples.sample_type() != fmt.sample_type {
        return Err(ImageError::LayoutMismatch {
            expected: fmt.sample_type,
            actual: samples.sample_type(),
        });
    }

    match samples {
        Samples::U8(src) => unpack(src, width, height, fmt, stop),
        Samples::F32(src) => unpack(src, width, height, fmt, stop),
        Samples::F64(src) => unpack(src, width, height, fmt, stop),
    }
}

fn pack<T: Sample>(
    rgba: &[u8],
    width: u32,
    height: u32,
    fmt: &PixelFormat,
    stop: &dyn Stop,
) -> Result<Vec<T>, ImageError> {
    let channels = fmt.channels();
    let total = sample_count(width, height, channels)?;
    let w = width as usize;
    let h = height as usize;

    let (pixel_stride, row_stride, channel_stride) = fmt.strides(w, h);
    let order = fmt.channel_order();

    let mut out = vec![T::default(); total];
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = &rgba[y * w * 4..(y + 1) * w * 4];
        let mut i = row_stride * y;
        for px in row.chunks_exact(4) {
            if fmt.grayscale {
                out[i] = T::luma(px[0], px[1], px[2]);
            } else {
                for k in 0..channels {
                    out[i + k * channel_stride] = T::from_channel(px[order[k]]);
                }
            }
            i += pixel_stride;
        }
    }

    Ok(out)
}

fn unpack<T: Sample>(
    src: &[T],
    width: u32,
    height: u32,
    fmt: &PixelFormat,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageError> {
    let channels = fmt.channels();
    let needed = sample_count(width, height, channels)?;
    if src.len() < needed {
        return Err(ImageError::BufferTooSmall {
            needed,
            actual: src.len(),
        });
    }
    let canonical_len = sample_count(width, height, 4)?;
    let w = width as usize;
    let h = height as usize;

    let (pixel_stride, row_stride, channel_stride) = fmt.strides(w, h);
    let order = fmt.channel_order();

    let mut out = vec![0u8; canonical_len];
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = &mut out[y * w * 4..(y + 1) * w * 4];
        let mut i = row_stride * y;
        for px in row.chunks_exact_mut(4) {
            if fmt.grayscale {
                let g = src[i].to_channel();
                px[0] = g;
                px[1] = g;
                px[2] = g;
                px[3] = 255;
            } else if channels == 3 {
                for k in 0..3 {
                    px[order[k]] = src[i + k * channel_stride].to_channel();
                }
                px[3] = 255;
            } else {
                for k in 0..4 {
                    px[order[k]] = src[i + k * channel_stride].to_channel();
                }
            }
            i += pixel_stride;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_gray_is_identity() {
        for v in [0u8, 1, 17, 128, 254, 255] {
            assert_eq!(u8::luma(v, v, v), v);
        }
    }

    #[test]
    fn roundclamp_saturates() {
        assert_eq!((-0.5f32).to_channel(), 0);
        assert_eq!(2.0f32.to_channel(), 255);
        assert_eq!(1.0f64.to_channel(), 255);
        assert_eq!(0.0f64.to_channel(), 0);
    }

    #[test]
    fn white_luma_is_one() {
        assert!((f64::luma(255, 255, 255) - 1.0).abs() < 1e-12);
        assert!((f32::luma(255, 255, 255) - 1.0).abs() < 1e-6);
    }
}
