use crate::image::DEFAULT_BAD_COLOR;
use crate::samples::SampleType;
use crate::types::ColorType;
use clap::Parser;
use std::path::PathBuf;

/// Normalize raw numeric samples and encode them as PNG
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Raw little-endian sample file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// PNG file to write
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    pub width: usize,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    pub height: usize,

    /// Channel layout of each pixel
    #[arg(short, long, value_enum, default_value_t = ColorType::Greyscale)]
    pub color: ColorType,

    /// Element type of the input samples
    #[arg(short = 't', long, value_enum, default_value_t = SampleType::U8)]
    pub sample_type: SampleType,

    /// Substitute level for NaN/Infinity samples (float input only)
    #[arg(long, default_value_t = DEFAULT_BAD_COLOR)]
    pub bad_color: u8,

    /// Use u8 samples as pixels without normalizing
    #[arg(long)]
    pub raw: bool,

    /// Render the written PNG in the terminal
    #[arg(short, long)]
    pub preview: bool,

    /// Print an image summary and log progress
    #[arg(short, long)]
    pub verbose: bool,
}
