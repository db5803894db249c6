//! Rescaling of numeric samples into 8-bit channel values

use crate::error::PngError;

/// Substitute byte used for NaN/Infinity samples unless the caller picks one
pub const DEFAULT_BAD_COLOR: u8 = 0;

/// Integer sample types accepted by [`normalize_integers`]
pub trait IntegerSample: Copy + Ord {
    fn to_f64(self) -> f64;
}

/// Floating-point sample types accepted by [`normalize_floats`]
pub trait FloatSample: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(impl IntegerSample for $t {
            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_integer_sample!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl FloatSample for f32 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl FloatSample for f64 {
    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Result of float normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub pixels: Vec<u8>,
    /// Positions of NaN/Infinity samples, in input order
    pub bad_pixels: Vec<usize>,
}

/// Round half away from zero and saturate into [0, 255]; NaN maps to 0
#[inline]
#[must_use]
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Scale integers by their maximum: `round(255 * value / max)`
///
/// # Errors
///
/// Returns [`PngError::CanNotComputeMaxValue`] for an empty slice
pub fn normalize_integers<T: IntegerSample>(samples: &[T]) -> Result<Vec<u8>, PngError> {
    let max = samples
        .iter()
        .copied()
        .max()
        .ok_or(PngError::CanNotComputeMaxValue)?
        .to_f64();

    log::debug!("normalizing {} integer samples, max={max}", samples.len());

    Ok(samples
        .iter()
        .map(|&value| to_channel(255.0 * value.to_f64() / max))
        .collect())
}

/// Indices of samples that are NaN or infinite
#[must_use]
pub fn bad_pixel_indices<T: FloatSample>(samples: &[T]) -> Vec<usize> {
    samples
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.to_f64().is_finite())
        .map(|(idx, _)| idx)
        .collect()
}

/// Value written in place of a bad sample before rescaling
///
/// The expression mixes the data range with `min` and does not place
/// `bad_color` at a fixed output level. Existing output depends on it.
#[inline]
#[must_use]
pub fn bad_pixel_substitute(bad_color: u8, min: f64, max: f64) -> f64 {
    f64::from(bad_color) / 255.0 * ((max - min) - min)
}

/// Min/max rescale of floats with NaN/Infinity substitution
///
/// # Errors
///
/// Returns [`PngError::CanNotComputeMaxValue`] when no finite sample exists
pub fn normalize_floats<T: FloatSample>(
    samples: &[T],
    bad_color: u8,
) -> Result<Normalized, PngError> {
    let valid = || {
        samples
            .iter()
            .map(|value| value.to_f64())
            .filter(|value| value.is_finite())
    };

    let max = valid().reduce(f64::max).ok_or(PngError::CanNotComputeMaxValue)?;
    let min = valid().reduce(f64::min).ok_or(PngError::CanNotComputeMinValue)?;

    let bad_pixels = bad_pixel_indices(samples);
    let mut values: Vec<f64> = samples.iter().map(|value| value.to_f64()).collect();
    if !bad_pixels.is_empty() {
        let substitute = bad_pixel_substitute(bad_color, min, max);
        for &idx in &bad_pixels {
            values[idx] = substitute;
        }
    }

    log::debug!(
        "normalizing {} float samples, min={min}, max={max}, bad={}",
        samples.len(),
        bad_pixels.len()
    );

    // Halved terms keep `max - min` finite across the whole f64 range
    let half_min = min / 2.0;
    let half_range = max / 2.0 - half_min;
    let pixels = values
        .iter()
        .map(|&value| to_channel(255.0 * ((value / 2.0 - half_min) / half_range)))
        .collect();

    Ok(Normalized { pixels, bad_pixels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    #[test]
    fn test_integer_half_rounds_up() {
        let pixels = normalize_integers(&[0u32, 50, 100]).unwrap();
        assert_eq!(pixels, vec![0, 128, 255]);
    }

    #[test]
    fn test_integer_empty_fails() {
        let result = normalize_integers::<u16>(&[]);
        assert_matches!(result, Err(PngError::CanNotComputeMaxValue));
    }

    #[test]
    fn test_integer_negative_values_clamp_to_zero() {
        let pixels = normalize_integers(&[-20i32, 0, 10]).unwrap();
        assert_eq!(pixels, vec![0, 0, 255]);
    }

    #[test]
    fn test_integer_all_zero_maps_to_zero() {
        let pixels = normalize_integers(&[0u8, 0, 0, 0]).unwrap();
        assert_eq!(pixels, vec![0; 4]);
    }

    #[test]
    fn test_integer_wide_types() {
        let pixels = normalize_integers(&[u64::MAX / 2, u64::MAX]).unwrap();
        assert_eq!(pixels, vec![128, 255]);
    }

    #[test]
    fn test_float_nan_substituted_before_rescale() {
        let result = normalize_floats(&[1.0f64, f64::NAN, 3.0], 0).unwrap();
        assert_eq!(result.pixels.len(), 3);
        assert_eq!(result.bad_pixels, vec![1]);
        // substitute = 0 -> (0 - 1) / 2 * 255 saturates to 0
        assert_eq!(result.pixels, vec![0, 0, 255]);
    }

    #[test]
    fn test_float_bad_color_uses_data_range() {
        // min=0, max=10: substitute = 255/255 * (10 - 0) = 10 -> 255
        let result = normalize_floats(&[0.0f32, f32::INFINITY, 10.0], 255).unwrap();
        assert_eq!(result.pixels, vec![0, 255, 255]);

        // min=2, max=6: substitute = 1.0 * (4 - 2) = 2 -> 0
        let result = normalize_floats(&[2.0f32, f32::NEG_INFINITY, 6.0], 255).unwrap();
        assert_eq!(result.pixels, vec![0, 0, 255]);
    }

    #[test]
    fn test_bad_pixel_substitute_formula() {
        assert_relative_eq!(bad_pixel_substitute(51, 1.0, 3.0), 0.2);
        assert_relative_eq!(bad_pixel_substitute(255, -4.0, 4.0), 12.0);
        assert_relative_eq!(bad_pixel_substitute(0, 5.0, 9.0), 0.0);
    }

    #[test]
    fn test_float_all_invalid_fails() {
        let result = normalize_floats(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY], 0);
        assert_matches!(result, Err(PngError::CanNotComputeMaxValue));

        let result = normalize_floats::<f32>(&[], 0);
        assert_matches!(result, Err(PngError::CanNotComputeMaxValue));
    }

    #[test]
    fn test_float_rescale_rounds() {
        let result = normalize_floats(&[-1.0f64, 0.0, 1.0], 0).unwrap();
        assert!(result.bad_pixels.is_empty());
        assert_eq!(result.pixels, vec![0, 128, 255]);
    }

    #[test]
    fn test_float_extreme_range_does_not_overflow() {
        let result = normalize_floats(&[-1e308f64, 0.0, 1e308], 0).unwrap();
        assert_eq!(result.pixels, vec![0, 128, 255]);

        let result = normalize_floats(&[f64::MIN, f64::MAX], 0).unwrap();
        assert_eq!(result.pixels, vec![0, 255]);
    }

    #[test]
    fn test_float_constant_input_maps_to_zero() {
        let result = normalize_floats(&[7.5f64; 6], 0).unwrap();
        assert_eq!(result.pixels, vec![0; 6]);
    }

    #[test]
    fn test_bad_pixel_indices_preserve_order() {
        let samples = [f32::NAN, 1.0, f32::INFINITY, 2.0, f32::NAN];
        assert_eq!(bad_pixel_indices(&samples), vec![0, 2, 4]);
    }

    #[test]
    fn test_to_channel_saturates() {
        assert_eq!(to_channel(-3.0), 0);
        assert_eq!(to_channel(254.5), 255);
        assert_eq!(to_channel(1000.0), 255);
        assert_eq!(to_channel(f64::NAN), 0);
        assert_eq!(to_channel(f64::INFINITY), 255);
    }
}
