//! BMP encoder: 8-bit indexed when a small palette pays for itself,
//! 24-bit RGB otherwise. Alpha is always dropped; color is exact.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::ImageError;
use crate::palette::scan_palette_dyn;

pub(crate) fn encode_bmp(
    rgba: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    let w = width as usize;
    let h = height as usize;
    let expected = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(ImageError::DimensionsTooLarge { width, height })?;
    if rgba.len() < expected {
        return Err(ImageError::BufferTooSmall {
            needed: expected,
            actual: rgba.len(),
        });
    }

    stop.check()?;
    let scan = scan_palette_dyn(&rgba[..expected], stop)?;

    // Indexed output only when the palette actually shrinks the file:
    // one index byte per pixel plus a 4-byte table entry per color versus
    // three bytes per pixel.
    let palette = match scan.colors {
        Some(colors) if !colors.is_empty() && 2 * colors.len() < w * h => Some(colors),
        _ => None,
    };

    let (row_stride, bpp, num_colors) = match &palette {
        Some(colors) => ((w + 3) & !3, 8u16, colors.len()),
        None => ((w * 3 + 3) & !3, 24u16, 0),
    };
    let pixel_data_size = row_stride
        .checked_mul(h)
        .ok_or(ImageError::DimensionsTooLarge { width, height })?;
    let data_offset = 54 + 4 * num_colors;
    let file_size = pixel_data_size
        .checked_add(data_offset)
        .ok_or(ImageError::DimensionsTooLarge { width, height })?;

    let mut out = Vec::with_capacity(file_size);

    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    // Info header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    // A full 256-entry palette is written as 0 by BMP convention.
    let colors_field = if num_colors == 0 || num_colors == 256 {
        0u32
    } else {
        num_colors as u32
    };
    out.extend_from_slice(&colors_field.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    if let Some(colors) = &palette {
        for c in colors {
            out.extend_from_slice(&[c[2], c[1], c[0], 0]); // B, G, R, unused
        }
    }

    let pad = row_stride - if palette.is_some() { w } else { w * 3 };
    for row in (0..h).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let row_pixels = &rgba[row * w * 4..(row + 1) * w * 4];
        if let Some(colors) = &palette {
            for px in row_pixels.chunks_exact(4) {
                let px: [u8; 4] = [px[0], px[1], px[2], px[3]];
                let idx = colors.iter().position(|c| *c == px).ok_or_else(|| {
                    ImageError::InvalidData("pixel color missing from scanned palette".into())
                })?;
                out.push(idx as u8);
            }
        } else {
            for px in row_pixels.chunks_exact(4) {
                out.push(px[2]); // blue
                out.push(px[1]); // green
                out.push(px[0]); // red
            }
        }
        out.extend(core::iter::repeat_n(0u8, pad));
    }

    Ok(out)
}
