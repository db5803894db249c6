pub mod cli;
pub mod display;
pub mod display_info;
pub mod encode;
pub mod error;
pub mod image;
pub mod samples;
pub mod types;

// Re-export commonly used items
pub use display_info::print_summary;
pub use encode::{PngSink, encode};
pub use error::{PngError, ProcessError};
pub use crate::image::Image;
pub use types::{ColorType, DEFAULT_BIT_DEPTH, Dimensions};
