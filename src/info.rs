//! File-type identification by magic number and header-only probing.

use crate::error::ImageError;

/// Image file type detected from magic bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Bmp,
    Jpeg,
    Png,
    Tiff,
    Gif,
    Mng,
    Pcx,
}

impl ImageFormat {
    /// Identify a file type from its first bytes, without decoding.
    pub fn detect(data: &[u8]) -> Option<ImageFormat> {
        if data.len() < 4 {
            return None;
        }
        match data {
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(ImageFormat::Tiff),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [0x8A, b'M', b'N', b'G', ..] => Some(ImageFormat::Mng),
            // PCX: marker byte, version < 6, RLE encoding flag.
            [0x0A, version, 0x01, _, ..] if *version < 6 => Some(ImageFormat::Pcx),
            _ => None,
        }
    }
}

/// Header-only image information, read without decoding pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl ImageInfo {
    /// Probe dimensions from a file header.
    ///
    /// Supported for BMP (native header parse) and PNG (IHDR chunk).
    /// Other recognized formats report [`ImageError::UnsupportedVariant`];
    /// unknown magic bytes report [`ImageError::UnrecognizedFormat`].
    pub fn from_bytes(data: &[u8]) -> Result<ImageInfo, ImageError> {
        match ImageFormat::detect(data) {
            Some(ImageFormat::Bmp) => {
                let (width, height) = crate::bmp::probe(data)?;
                Ok(ImageInfo {
                    width,
                    height,
                    format: ImageFormat::Bmp,
                })
            }
            Some(ImageFormat::Png) => {
                // 8-byte signature, 4-byte chunk length, "IHDR", then
                // width and height as big-endian u32.
                if data.len() < 24 {
                    return Err(ImageError::UnexpectedEof);
                }
                if &data[12..16] != b"IHDR" {
                    return Err(ImageError::InvalidHeader(
                        "PNG file does not start with an IHDR chunk".into(),
                    ));
                }
                let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
                let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
                Ok(ImageInfo {
                    width,
                    height,
                    format: ImageFormat::Png,
                })
            }
            Some(kind) => Err(ImageError::UnsupportedVariant(alloc::format!(
                "header probing not supported for {kind:?}"
            ))),
            None => Err(ImageError::UnrecognizedFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_magic_numbers() {
        assert_eq!(ImageFormat::detect(b"BM\x00\x00"), Some(ImageFormat::Bmp));
        assert_eq!(
            ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::detect(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::detect(b"II\x2A\x00"), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::detect(b"MM\x00\x2A"), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::detect(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(
            ImageFormat::detect(&[0x0A, 0x05, 0x01, 0x08]),
            Some(ImageFormat::Pcx)
        );
        assert_eq!(ImageFormat::detect(b"...."), None);
        assert_eq!(ImageFormat::detect(b"BM"), None); // too short to judge
    }
}
