use crate::types::ImageSummary;

pub fn print_summary(summary: &ImageSummary) {
    println!(
        "{:20}: {} [{}]",
        "Dimensions", summary.dimensions, summary.color_type
    );
    println!("{:20}: {}", "Bit Depth", summary.bit_depth);

    if summary.bad_pixels > 0 {
        println!("{:20}: {}", "Bad Pixels", summary.bad_pixels);
    }

    if let Some(len) = summary.encoded_len {
        println!("{:20}: {} bytes", "Encoded Size", len);
    }

    println!();
}
