use clap::Parser;
use pngnorm::cli::Args;
use pngnorm::samples::{self, SampleType};
use pngnorm::{Image, ProcessError, display};

fn main() {
    let args = Args::parse();

    let verbosity = if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    match process_file(&args) {
        Ok(image) => {
            if args.verbose {
                pngnorm::print_summary(&image.summary());
            }
        }
        Err(e) => {
            if args.verbose
                && let Some(summary) = e.summary() {
                    pngnorm::print_summary(summary);
                }
            println!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Convert a single raw sample file into a PNG
fn process_file(args: &Args) -> Result<Image, ProcessError> {
    // Stage 1: Read raw samples
    let bytes = std::fs::read(&args.input).map_err(|e| {
        ProcessError::ReadFailed(format!(
            "Failed to read sample file {}: {e}",
            args.input.display()
        ))
    })?;

    if args.raw && args.sample_type != SampleType::U8 {
        return Err(ProcessError::DecodeFailed(format!(
            "--raw requires u8 samples, got {}",
            args.sample_type
        )));
    }

    // Stage 2: Decode samples
    let samples = samples::decode_samples(&bytes, args.sample_type)
        .map_err(|e| ProcessError::DecodeFailed(e.to_string()))?;
    log::info!(
        "decoded {} {} samples from {}",
        samples.len(),
        args.sample_type,
        args.input.display()
    );

    // Stage 3: Normalize and validate
    let image = samples
        .into_image(args.width, args.height, args.color, args.bad_color, args.raw)
        .map_err(ProcessError::BuildFailed)?;

    if image.bad_pixels() > 0 {
        log::warn!("replaced {} NaN/Infinity samples", image.bad_pixels());
    }

    // Stage 4: Encode and write
    image
        .write_to(&args.output)
        .map_err(|e| ProcessError::WriteFailed {
            summary: Box::new(image.summary()),
            error: format!("Failed to write {}: {e}", args.output.display()),
        })?;

    // Stage 5: Preview
    if args.preview {
        let png = image.encoded().map_err(|e| ProcessError::PreviewFailed {
            summary: Box::new(image.summary()),
            error: e.to_string(),
        })?;
        display::print_png(png).map_err(|e| ProcessError::PreviewFailed {
            summary: Box::new(image.summary()),
            error: format!("{e:#}"),
        })?;
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pngnorm::ColorType;
    use std::path::Path;

    fn args_for(input: &Path, output: &Path, sample_type: SampleType) -> Args {
        Args {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: 2,
            height: 2,
            color: ColorType::Greyscale,
            sample_type,
            bad_color: 0,
            raw: false,
            preview: false,
            verbose: false,
        }
    }

    #[test]
    fn test_f32_file_converts_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.f32");
        let output = dir.path().join("out.png");
        let bytes: Vec<u8> = [0.0f32, f32::NAN, 2.0, 4.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        std::fs::write(&input, bytes).unwrap();

        let image = process_file(&args_for(&input, &output, SampleType::F32))
            .expect("Conversion should succeed");
        assert_eq!(image.pixels(), &[0, 0, 128, 255]);
        assert_eq!(image.bad_pixels(), 1);
        assert!(output.exists());
    }

    #[test]
    fn test_missing_input_returns_readfailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(
            &dir.path().join("missing.raw"),
            &dir.path().join("out.png"),
            SampleType::U8,
        );
        assert_matches!(process_file(&args), Err(ProcessError::ReadFailed(_)));
    }

    #[test]
    fn test_wrong_sample_count_returns_buildfailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.u16");
        std::fs::write(&input, [1u8, 0, 2, 0, 3, 0]).unwrap();

        let args = args_for(&input, &dir.path().join("out.png"), SampleType::U16);
        let result = process_file(&args);
        assert_matches!(result, Err(ProcessError::BuildFailed(_)));
        assert!(result.unwrap_err().summary().is_none());
    }

    #[test]
    fn test_raw_with_wide_samples_returns_decodefailed_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.u16");
        std::fs::write(&input, [0u8; 8]).unwrap();

        let mut args = args_for(&input, &dir.path().join("out.png"), SampleType::U16);
        args.raw = true;
        assert_matches!(process_file(&args), Err(ProcessError::DecodeFailed(_)));
    }

    #[test]
    fn test_unwritable_output_keeps_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.u8");
        std::fs::write(&input, [1u8, 2, 3, 4]).unwrap();

        let args = args_for(&input, &dir.path().join("no-such-dir").join("out.png"), SampleType::U8);
        let err = process_file(&args).unwrap_err();
        assert_matches!(err, ProcessError::WriteFailed { .. });
        assert_eq!(err.summary().map(|s| s.dimensions.width), Some(2));
    }
}
