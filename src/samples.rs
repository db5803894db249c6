//! Decoding of raw little-endian sample files

use crate::error::PngError;
use crate::image::Image;
use crate::types::{ColorType, DEFAULT_BIT_DEPTH};
use anyhow::{Result, bail};
use clap::ValueEnum;
use std::fmt;

/// Element type of a raw sample file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleType {
    U8,
    U16,
    U32,
    I16,
    I32,
    F32,
    F64,
}

impl SampleType {
    #[inline]
    #[must_use]
    pub fn byte_width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        };
        write!(f, "{name}")
    }
}

/// Decoded samples, split by which normalizer they need
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Samples {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32(_) | Self::F64(_))
    }

    /// Normalize into an image; `raw` u8 samples are used as pixels unchanged
    ///
    /// # Errors
    ///
    /// Propagates normalization and size validation failures
    pub fn into_image(
        self,
        width: usize,
        height: usize,
        color_type: ColorType,
        bad_color: u8,
        raw: bool,
    ) -> Result<Image, PngError> {
        match self {
            Self::U8(v) if raw => {
                Image::from_pixels(width, height, color_type, DEFAULT_BIT_DEPTH, v)
            }
            Self::U8(v) => Image::from_integers(width, height, color_type, &v),
            Self::U16(v) => Image::from_integers(width, height, color_type, &v),
            Self::U32(v) => Image::from_integers(width, height, color_type, &v),
            Self::I16(v) => Image::from_integers(width, height, color_type, &v),
            Self::I32(v) => Image::from_integers(width, height, color_type, &v),
            Self::F32(v) => Image::from_floats(width, height, color_type, bad_color, &v),
            Self::F64(v) => Image::from_floats(width, height, color_type, bad_color, &v),
        }
    }
}

/// Decode little-endian bytes into samples of the given type
///
/// # Errors
///
/// Returns an error if the byte count is not a multiple of the sample width
pub fn decode_samples(bytes: &[u8], sample_type: SampleType) -> Result<Samples> {
    let width = sample_type.byte_width();
    if !bytes.len().is_multiple_of(width) {
        bail!(
            "Invalid {sample_type} sample data length: {} bytes is not a multiple of {width}",
            bytes.len()
        );
    }

    Ok(match sample_type {
        SampleType::U8 => Samples::U8(bytes.to_vec()),
        SampleType::U16 => Samples::U16(decode_le(bytes, u16::from_le_bytes)),
        SampleType::U32 => Samples::U32(decode_le(bytes, u32::from_le_bytes)),
        SampleType::I16 => Samples::I16(decode_le(bytes, i16::from_le_bytes)),
        SampleType::I32 => Samples::I32(decode_le(bytes, i32::from_le_bytes)),
        SampleType::F32 => Samples::F32(decode_le(bytes, f32::from_le_bytes)),
        SampleType::F64 => Samples::F64(decode_le(bytes, f64::from_le_bytes)),
    })
}

/// Split into `N`-byte chunks and convert each; a short tail is ignored
fn decode_le<const N: usize, T>(bytes: &[u8], from_le_bytes: fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_le_bytes(raw)
        })
        .collect()
}
