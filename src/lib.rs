//! # zenimageio
//!
//! Image file I/O with a native BMP codec and a universal pixel-format
//! conversion engine.
//!
//! ## Canonical buffer
//!
//! Every decoder produces, and every encoder consumes, the same interchange
//! representation: a row-major, top-down, interleaved buffer of 8-bit
//! R,G,B,A channels (4 bytes per pixel). The conversion engine translates
//! between that canonical form and any combination of sample type
//! (u8/f32/f64), channel set and order (gray, RGB, BGR, RGBA, BGRA, ARGB,
//! ABGR), interleaved vs. planar layout, and row- vs. column-major order.
//!
//! ## Formats
//!
//! - **BMP**: native decode of 1/4/8/16/24/32-bit files, including RLE4,
//!   RLE8, and bitfield color masks, for both the OS/2 v1 and Windows
//!   header dialects; native encode of 8-bit indexed and 24-bit RGB.
//! - **PNG** (`png` feature): delegated to the `png` crate.
//! - **JPEG** (`jpeg` feature): delegated to `jpeg-decoder`/`jpeg-encoder`.
//!
//! ## Non-Goals
//!
//! - Streaming or incremental decoding
//! - Color management beyond grayscale luma
//! - Animated or multi-frame formats
//!
//! ## Usage
//!
//! ```no_run
//! use zenimageio::{DecodeRequest, EncodeRequest, PixelFormat, SampleType, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP/PNG/JPEG bytes
//!
//! // Decode to the canonical RGBA-u8 buffer
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! println!("{}x{}", decoded.width, decoded.height);
//!
//! // Convert to planar f32 RGB
//! let fmt = PixelFormat {
//!     sample_type: SampleType::F32,
//!     strip_alpha: true,
//!     planar: true,
//!     ..PixelFormat::default()
//! };
//! let planar = decoded.to_format(&fmt, Unstoppable)?;
//!
//! // Encode the canonical buffer back to BMP
//! let bmp = EncodeRequest::bmp().encode(
//!     decoded.pixels(), decoded.width, decoded.height, Unstoppable)?;
//! # Ok::<(), zenimageio::ImageError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;

pub mod bmp;
pub mod convert;
pub mod format;
pub mod palette;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod file;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::ImageError;
#[cfg(feature = "std")]
pub use file::{read_image, write_image};
pub use format::{FormattedImage, PixelFormat, SampleBuffer, SampleType, Samples};
pub use info::{ImageFormat, ImageInfo};
pub use limits::{Limits, MAX_IMAGE_DIMENSION};
pub use palette::{PaletteScan, scan_palette};
