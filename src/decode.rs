use alloc::vec::Vec;

use enough::Stop;

use crate::convert;
use crate::error::ImageError;
use crate::format::{FormattedImage, PixelFormat};
use crate::info::ImageFormat;
use crate::limits::Limits;

/// A decoded image: the canonical buffer plus its dimensions.
///
/// The pixel data is always row-major, top-down, interleaved RGBA with one
/// byte per channel (`width * height * 4` bytes), regardless of which
/// codec produced it.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Access the canonical RGBA pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the canonical pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Convert into the layout described by `fmt`.
    pub fn to_format(
        &self,
        fmt: &PixelFormat,
        stop: impl Stop,
    ) -> Result<FormattedImage, ImageError> {
        let samples =
            convert::from_canonical_dyn(&self.pixels, self.width, self.height, fmt, &stop)?;
        Ok(FormattedImage {
            samples,
            width: self.width,
            height: self.height,
            format: *fmt,
        })
    }

    /// View the canonical buffer as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgba(&self) -> &[rgb::RGBA8] {
        use rgb::AsPixels as _;
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(self.as_rgba(), self.width as usize, self.height as usize)
    }
}

/// Builder for decoding an in-memory image file.
///
/// The file type is detected from its magic bytes; BMP is decoded natively,
/// PNG and JPEG are delegated to their codec crates when the matching
/// feature is enabled.
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to the canonical RGBA buffer.
    pub fn decode(&self, stop: impl Stop) -> Result<DecodeOutput, ImageError> {
        self.decode_dyn(&stop)
    }

    /// Decode, then convert to the layout described by `fmt`.
    pub fn decode_as(
        &self,
        fmt: &PixelFormat,
        stop: impl Stop,
    ) -> Result<FormattedImage, ImageError> {
        let out = self.decode_dyn(&stop)?;
        let samples = convert::from_canonical_dyn(out.pixels(), out.width, out.height, fmt, &stop)?;
        Ok(FormattedImage {
            samples,
            width: out.width,
            height: out.height,
            format: *fmt,
        })
    }

    fn decode_dyn(&self, stop: &dyn Stop) -> Result<DecodeOutput, ImageError> {
        match ImageFormat::detect(self.data) {
            Some(ImageFormat::Bmp) => crate::bmp::decode(self.data, self.limits, stop),
            #[cfg(feature = "png")]
            Some(ImageFormat::Png) => crate::png::decode(self.data, self.limits, stop),
            #[cfg(feature = "jpeg")]
            Some(ImageFormat::Jpeg) => crate::jpeg::decode(self.data, self.limits, stop),
            Some(kind) => Err(ImageError::UnsupportedVariant(alloc::format!(
                "no decoder available for {kind:?}"
            ))),
            None => Err(ImageError::UnrecognizedFormat),
        }
    }
}
