use alloc::vec::Vec;

use enough::Stop;

use crate::convert;
use crate::error::ImageError;
use crate::format::{PixelFormat, Samples};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EncodeFormat {
    Bmp,
    #[cfg(feature = "png")]
    Png,
    #[cfg(feature = "jpeg")]
    Jpeg,
}

/// Builder for encoding a canonical RGBA buffer to an image file.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    format: EncodeFormat,
    /// JPEG quality factor, 0–100. Ignored by other formats.
    quality: u8,
}

impl EncodeRequest {
    /// Encode to BMP (8-bit indexed or 24-bit RGB, chosen automatically).
    pub fn bmp() -> Self {
        Self {
            format: EncodeFormat::Bmp,
            quality: 90,
        }
    }

    /// Encode to PNG (RGBA, 8-bit).
    #[cfg(feature = "png")]
    pub fn png() -> Self {
        Self {
            format: EncodeFormat::Png,
            quality: 90,
        }
    }

    /// Encode to JPEG with the given quality factor (0–100).
    #[cfg(feature = "jpeg")]
    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: EncodeFormat::Jpeg,
            quality,
        }
    }

    /// Select the output format from a file name suffix, case-insensitively.
    ///
    /// Recognized: `.bmp`, `.png`, `.jpg`, `.jpeg`. Suffixes for formats
    /// whose feature is disabled, and unrecognized suffixes, are rejected.
    pub fn for_path(path: &str) -> Result<Self, ImageError> {
        if ends_with_ignore_case(path, ".bmp") {
            return Ok(Self::bmp());
        }
        if ends_with_ignore_case(path, ".png") {
            #[cfg(feature = "png")]
            return Ok(Self::png());
            #[cfg(not(feature = "png"))]
            return Err(ImageError::UnsupportedVariant(
                "PNG output requires the `png` feature".into(),
            ));
        }
        if ends_with_ignore_case(path, ".jpg") || ends_with_ignore_case(path, ".jpeg") {
            #[cfg(feature = "jpeg")]
            return Ok(Self::jpeg(90));
            #[cfg(not(feature = "jpeg"))]
            return Err(ImageError::UnsupportedVariant(
                "JPEG output requires the `jpeg` feature".into(),
            ));
        }
        Err(ImageError::UnsupportedVariant(alloc::format!(
            "unrecognized output file suffix: {path}"
        )))
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Encode a canonical RGBA-u8 buffer.
    pub fn encode(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, ImageError> {
        self.encode_dyn(rgba, width, height, &stop)
    }

    /// Convert a buffer in the layout described by `fmt` back to canonical
    /// form, then encode it.
    pub fn encode_from(
        &self,
        samples: Samples<'_>,
        width: u32,
        height: u32,
        fmt: &PixelFormat,
        stop: impl Stop,
    ) -> Result<Vec<u8>, ImageError> {
        let rgba = convert::to_canonical_dyn(samples, width, height, fmt, &stop)?;
        self.encode_dyn(&rgba, width, height, &stop)
    }

    fn encode_dyn(
        &self,
        rgba: &[u8],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, ImageError> {
        match self.format {
            EncodeFormat::Bmp => crate::bmp::encode(rgba, width, height, stop),
            #[cfg(feature = "png")]
            EncodeFormat::Png => crate::png::encode(rgba, width, height, stop),
            #[cfg(feature = "jpeg")]
            EncodeFormat::Jpeg => crate::jpeg::encode(rgba, width, height, self.quality, stop),
        }
    }
}

fn ends_with_ignore_case(path: &str, suffix: &str) -> bool {
    path.len() >= suffix.len()
        && path
            .as_bytes()
            .iter()
            .rev()
            .zip(suffix.as_bytes().iter().rev())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}
