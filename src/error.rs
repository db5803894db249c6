use crate::types::ImageSummary;
use std::fmt;
use thiserror::Error;

/// Errors produced while building or encoding an image
#[derive(Debug, Error)]
pub enum PngError {
    /// Serialization produced no bytes
    #[error("PNG serialization produced no output")]
    WriteError,

    /// Reserved for a future decoding entry point
    #[error("failed to read PNG data")]
    ReadError,

    #[error("incorrect pixel data size: expected {expected} samples, got {actual}")]
    IncorrectDataSize { expected: usize, actual: usize },

    #[error("can not compute max value: no valid samples")]
    CanNotComputeMaxValue,

    #[error("can not compute min value: no valid samples")]
    CanNotComputeMinValue,

    #[error("unsupported bit depth: {0} (only 8 is supported)")]
    UnsupportedBitDepth(u8),

    #[error("image dimensions {width}x{height} exceed the PNG limit")]
    DimensionsTooLarge { width: usize, height: usize },

    #[error("PNG encoder failed: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error type that preserves the image summary when available
#[derive(Debug)]
pub enum ProcessError {
    /// Input file could not be read
    ReadFailed(String),

    /// Raw bytes could not be decoded into samples
    DecodeFailed(String),

    /// Samples were read but the image could not be built
    BuildFailed(PngError),

    /// Image built successfully, but writing the PNG failed
    WriteFailed {
        summary: Box<ImageSummary>,
        error: String,
    },

    /// PNG written but the terminal preview failed
    PreviewFailed {
        summary: Box<ImageSummary>,
        error: String,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::ReadFailed(msg) => write!(f, "{msg}"),
            ProcessError::DecodeFailed(msg) => write!(f, "{msg}"),
            ProcessError::BuildFailed(error) => write!(f, "{error}"),
            ProcessError::WriteFailed { error, .. } => write!(f, "{error}"),
            ProcessError::PreviewFailed { error, .. } => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ProcessError {}

impl ProcessError {
    /// Returns the image summary if the image was built before the failure
    pub fn summary(&self) -> Option<&ImageSummary> {
        match self {
            ProcessError::WriteFailed { summary, .. } => Some(summary),
            ProcessError::PreviewFailed { summary, .. } => Some(summary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_data_size_message() {
        let err = PngError::IncorrectDataSize {
            expected: 12,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "incorrect pixel data size: expected 12 samples, got 10"
        );
    }

    #[test]
    fn test_summary_only_for_late_stages() {
        let err = ProcessError::BuildFailed(PngError::CanNotComputeMaxValue);
        assert!(err.summary().is_none());
        assert_eq!(err.to_string(), "can not compute max value: no valid samples");
    }
}
