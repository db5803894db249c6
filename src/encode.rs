//! PNG serialization through the `png` codec
//!
//! Rows are streamed into an in-memory [`PngSink`] in top-to-bottom order.
//! Chunk framing, compression and filtering are left entirely to the codec.

use crate::error::PngError;
use crate::types::{ColorType, DEFAULT_BIT_DEPTH, Dimensions};
use std::io::{self, Write};

/// Growable output buffer the encoder writes into
#[derive(Debug, Default)]
pub struct PngSink {
    bytes: Vec<u8>,
    chunks: usize,
}

impl PngSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of writes the encoder issued
    #[inline]
    #[must_use]
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Write for PngSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        self.chunks += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Check bit depth and buffer length against the image geometry
pub(crate) fn validate(
    dimensions: Dimensions,
    color_type: ColorType,
    bit_depth: u8,
    len: usize,
) -> Result<(), PngError> {
    if bit_depth != DEFAULT_BIT_DEPTH {
        return Err(PngError::UnsupportedBitDepth(bit_depth));
    }

    let expected = dimensions
        .sample_count(color_type)
        .ok_or(PngError::DimensionsTooLarge {
            width: dimensions.width,
            height: dimensions.height,
        })?;
    if len != expected {
        return Err(PngError::IncorrectDataSize {
            expected,
            actual: len,
        });
    }

    Ok(())
}

pub(crate) fn png_dimensions(dimensions: Dimensions) -> Result<(u32, u32), PngError> {
    let too_large = || PngError::DimensionsTooLarge {
        width: dimensions.width,
        height: dimensions.height,
    };
    let width = u32::try_from(dimensions.width).map_err(|_| too_large())?;
    let height = u32::try_from(dimensions.height).map_err(|_| too_large())?;
    Ok((width, height))
}

/// Encode 8-bit pixels as PNG
///
/// # Errors
///
/// Returns [`PngError::IncorrectDataSize`] or [`PngError::UnsupportedBitDepth`]
/// for inconsistent input, and [`PngError::Encoding`] if the codec rejects it
pub fn encode(
    pixels: &[u8],
    width: usize,
    height: usize,
    bit_depth: u8,
    color_type: ColorType,
) -> Result<Vec<u8>, PngError> {
    let dimensions = Dimensions::new(width, height);
    validate(dimensions, color_type, bit_depth, pixels.len())?;
    encode_rows(pixels, dimensions, bit_depth, color_type)
}

/// Encode a buffer whose length has already been validated
pub(crate) fn encode_rows(
    pixels: &[u8],
    dimensions: Dimensions,
    bit_depth: u8,
    color_type: ColorType,
) -> Result<Vec<u8>, PngError> {
    let (width, height) = png_dimensions(dimensions)?;
    let mut sink = PngSink::new();

    {
        let mut encoder = png::Encoder::new(&mut sink, width, height);
        encoder.set_color(color_type.into());
        encoder.set_depth(png_bit_depth(bit_depth)?);
        encoder.set_compression(png::Compression::Default);

        let mut writer = encoder.write_header()?;

        // A zero stride has no rows to stream; the codec rejects it at the header
        let stride = dimensions.row_stride(color_type);
        if stride > 0 {
            let mut stream = writer.stream_writer()?;
            for row in pixels.chunks_exact(stride) {
                stream.write_all(row)?;
            }
            stream.finish()?;
        }
        writer.finish()?;
    }

    if sink.is_empty() {
        return Err(PngError::WriteError);
    }

    log::debug!(
        "encoded {dimensions} {color_type} image: {} bytes in {} writes",
        sink.bytes.len(),
        sink.chunks()
    );

    Ok(sink.into_bytes())
}

fn png_bit_depth(bit_depth: u8) -> Result<png::BitDepth, PngError> {
    match bit_depth {
        8 => Ok(png::BitDepth::Eight),
        other => Err(PngError::UnsupportedBitDepth(other)),
    }
}
