use anyhow::{Context, Result, anyhow};
use image::ImageFormat;
use std::io::{IsTerminal, Write};
use viuer::{Config as ViuerConfig, print};

/// Decode PNG bytes and render them in the terminal
pub fn print_png(png: &[u8]) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();

    // Preview what was written, not the in-memory pixels
    let image = image::load_from_memory_with_format(png, ImageFormat::Png)
        .context("Failed to decode written PNG for preview")?;

    let config = ViuerConfig {
        width: Some(24),
        height: None,
        absolute_offset: false,
        use_kitty: is_tty,
        use_iterm: is_tty,
        use_sixel: is_tty,
        ..Default::default()
    };

    std::io::stdout().flush()
        .map_err(|e| anyhow!("Failed to flush stdout: {e}"))?;

    print(&image, &config)
        .map_err(|e| anyhow!("Failed to display image: {e}"))?;

    Ok(())
}
