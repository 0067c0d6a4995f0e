use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::render::image_cache::ImageCache;
use crate::render::{render_diagram, save_png};

pub fn run(
    file: &Path,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    quiet: bool,
) -> Result<()> {
    let (diagram, settings) = super::build_diagram(file, width, height)?;

    let images = ImageCache::for_diagram(&diagram);
    let canvas = render_diagram(&diagram, &settings.theme(), &images);

    let output = output.unwrap_or_else(|| file.with_extension("png"));
    save_png(&canvas, &output)?;

    for warning in &diagram.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    if !quiet {
        eprintln!(
            "{} {} ({} wires, {}x{})",
            "Wrote".green().bold(),
            output.display(),
            diagram.wires.len(),
            diagram.width,
            diagram.height
        );
    }
    Ok(())
}
