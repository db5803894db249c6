//! Domain-specific types for PNG images

use clap::ValueEnum;
use std::fmt;

/// The only per-channel bit depth produced by normalization
pub const DEFAULT_BIT_DEPTH: u8 = 8;

/// Channel layout of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ColorType {
    Greyscale,
    GreyscaleAlpha,
    Rgb,
    Rgba,
}

impl ColorType {
    /// Number of channels per pixel
    #[inline]
    #[must_use]
    pub fn components(self) -> usize {
        match self {
            Self::Greyscale => 1,
            Self::GreyscaleAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

impl From<ColorType> for png::ColorType {
    fn from(color_type: ColorType) -> Self {
        match color_type {
            ColorType::Greyscale => png::ColorType::Grayscale,
            ColorType::GreyscaleAlpha => png::ColorType::GrayscaleAlpha,
            ColorType::Rgb => png::ColorType::Rgb,
            ColorType::Rgba => png::ColorType::Rgba,
        }
    }
}

impl fmt::Display for ColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greyscale => write!(f, "greyscale"),
            Self::GreyscaleAlpha => write!(f, "greyscale+alpha"),
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// `None` if `width * height` overflows
    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Number of channel samples an image of this size and layout holds
    #[inline]
    #[must_use]
    pub fn sample_count(&self, color_type: ColorType) -> Option<usize> {
        self.pixel_count()?.checked_mul(color_type.components())
    }

    /// Bytes per row at 8 bits per channel
    ///
    /// Only meaningful once `sample_count` has been checked
    #[inline]
    #[must_use]
    pub fn row_stride(&self, color_type: ColorType) -> usize {
        self.width * color_type.components()
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// What the CLI reports about a built image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub dimensions: Dimensions,
    pub color_type: ColorType,
    pub bit_depth: u8,
    pub bad_pixels: usize,
    pub encoded_len: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_per_color_type() {
        assert_eq!(ColorType::Greyscale.components(), 1);
        assert_eq!(ColorType::GreyscaleAlpha.components(), 2);
        assert_eq!(ColorType::Rgb.components(), 3);
        assert_eq!(ColorType::Rgba.components(), 4);
    }

    #[test]
    fn test_png_color_tag_mapping() {
        assert_eq!(png::ColorType::from(ColorType::Greyscale), png::ColorType::Grayscale);
        assert_eq!(
            png::ColorType::from(ColorType::GreyscaleAlpha),
            png::ColorType::GrayscaleAlpha
        );
        assert_eq!(png::ColorType::from(ColorType::Rgb), png::ColorType::Rgb);
        assert_eq!(png::ColorType::from(ColorType::Rgba), png::ColorType::Rgba);
    }

    #[test]
    fn test_dimensions_counts() {
        let dims = Dimensions::new(4, 3);
        assert_eq!(dims.pixel_count(), Some(12));
        assert_eq!(dims.sample_count(ColorType::Rgb), Some(36));
        assert_eq!(dims.row_stride(ColorType::Rgba), 16);
        assert_eq!(dims.to_string(), "4x3");
    }

    #[test]
    fn test_dimensions_overflow_is_none() {
        assert_eq!(Dimensions::new(usize::MAX, 2).pixel_count(), None);
        assert_eq!(Dimensions::new(usize::MAX / 2, 1).sample_count(ColorType::Rgba), None);
        assert_eq!(Dimensions::new(usize::MAX, 1).sample_count(ColorType::Greyscale), Some(usize::MAX));
    }
}
