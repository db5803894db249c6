mod normalization;

pub use normalization::{
    DEFAULT_BAD_COLOR, FloatSample, IntegerSample, Normalized, bad_pixel_indices,
    bad_pixel_substitute, normalize_floats, normalize_integers, to_channel,
};

use crate::encode;
use crate::error::PngError;
use crate::types::{ColorType, DEFAULT_BIT_DEPTH, Dimensions, ImageSummary};
use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, RgbImage, RgbaImage};
use std::path::Path;
use std::sync::OnceLock;

/// Validated 8-bit image ready for PNG encoding
///
/// The pixel buffer never changes after construction, so the encoded bytes
/// are computed at most once and kept for the lifetime of the image.
#[derive(Debug)]
pub struct Image {
    dimensions: Dimensions,
    color_type: ColorType,
    bit_depth: u8,
    pixels: Vec<u8>,
    bad_pixels: usize,
    encoded: OnceLock<Vec<u8>>,
}

impl Image {
    /// Build an image from already normalized pixel bytes
    ///
    /// # Errors
    ///
    /// Returns [`PngError::IncorrectDataSize`] if `pixels.len()` is not
    /// `width * height * channels`, or [`PngError::UnsupportedBitDepth`]
    /// for any depth other than 8
    pub fn from_pixels(
        width: usize,
        height: usize,
        color_type: ColorType,
        bit_depth: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, PngError> {
        let dimensions = Dimensions::new(width, height);
        encode::validate(dimensions, color_type, bit_depth, pixels.len())?;

        Ok(Self {
            dimensions,
            color_type,
            bit_depth,
            pixels,
            bad_pixels: 0,
            encoded: OnceLock::new(),
        })
    }

    /// Build an image from integer samples scaled by their maximum
    ///
    /// # Errors
    ///
    /// Fails on an empty sample slice or a size mismatch
    pub fn from_integers<T: IntegerSample>(
        width: usize,
        height: usize,
        color_type: ColorType,
        samples: &[T],
    ) -> Result<Self, PngError> {
        let pixels = normalize_integers(samples)?;
        Self::from_pixels(width, height, color_type, DEFAULT_BIT_DEPTH, pixels)
    }

    /// Build an image from float samples, min/max rescaled
    ///
    /// NaN and infinite samples are replaced using `bad_color` before
    /// rescaling (see [`bad_pixel_substitute`]).
    ///
    /// # Errors
    ///
    /// Fails when no finite sample exists or on a size mismatch
    pub fn from_floats<T: FloatSample>(
        width: usize,
        height: usize,
        color_type: ColorType,
        bad_color: u8,
        samples: &[T],
    ) -> Result<Self, PngError> {
        let normalized = normalize_floats(samples, bad_color)?;
        let bad_pixels = normalized.bad_pixels.len();
        let mut image =
            Self::from_pixels(width, height, color_type, DEFAULT_BIT_DEPTH, normalized.pixels)?;
        image.bad_pixels = bad_pixels;
        Ok(image)
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    #[must_use]
    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    #[inline]
    #[must_use]
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of NaN/Infinity samples replaced during construction
    #[inline]
    #[must_use]
    pub fn bad_pixels(&self) -> usize {
        self.bad_pixels
    }

    /// PNG bytes for this image, encoded on first call
    ///
    /// # Errors
    ///
    /// Returns the encoder error; a failed attempt is not cached
    pub fn encoded(&self) -> Result<&[u8], PngError> {
        if let Some(bytes) = self.encoded.get() {
            return Ok(bytes);
        }

        let bytes = encode::encode_rows(
            &self.pixels,
            self.dimensions,
            self.bit_depth,
            self.color_type,
        )?;
        Ok(self.encoded.get_or_init(|| bytes))
    }

    /// Serialize to PNG and write it to `path`
    ///
    /// # Errors
    ///
    /// Returns [`PngError::WriteError`] if serialization produced nothing,
    /// without touching the filesystem
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), PngError> {
        let bytes = self.encoded()?;
        if bytes.is_empty() {
            return Err(PngError::WriteError);
        }

        std::fs::write(path.as_ref(), bytes)?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.as_ref().display());
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            dimensions: self.dimensions,
            color_type: self.color_type,
            bit_depth: self.bit_depth,
            bad_pixels: self.bad_pixels,
            encoded_len: self.encoded.get().map(Vec::len),
        }
    }

    /// Convert to a `DynamicImage` with the matching 8-bit layout
    ///
    /// # Errors
    ///
    /// Returns [`PngError::DimensionsTooLarge`] if a side exceeds `u32`
    pub fn to_dynamic_image(&self) -> Result<DynamicImage, PngError> {
        let (width, height) = encode::png_dimensions(self.dimensions)?;
        let pixels = self.pixels.clone();
        let too_large = || PngError::DimensionsTooLarge {
            width: self.width(),
            height: self.height(),
        };

        // Length was validated at construction, so from_raw only fails on overflow
        let image = match self.color_type {
            ColorType::Greyscale => {
                let buffer: GrayImage =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(too_large)?;
                DynamicImage::ImageLuma8(buffer)
            }
            ColorType::GreyscaleAlpha => {
                let buffer: GrayAlphaImage =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(too_large)?;
                DynamicImage::ImageLumaA8(buffer)
            }
            ColorType::Rgb => {
                let buffer: RgbImage =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(too_large)?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorType::Rgba => {
                let buffer: RgbaImage =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(too_large)?;
                DynamicImage::ImageRgba8(buffer)
            }
        };

        Ok(image)
    }
}
