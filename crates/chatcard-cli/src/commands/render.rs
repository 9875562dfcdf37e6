//! Render command implementation
//!
//! Reads a messages file, renders every message and writes one PNG stack.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use chatcard::{FontSources, MessageRenderer, RenderConfig, StackOptions};

use crate::cli::RenderArgs;
use crate::input::MessagesFile;

pub fn run(args: &RenderArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(wrap) = args.wrap {
        config.wrap = wrap.into();
    }

    let sources = FontSources {
        font_dir: args.font_dir.clone(),
        system_fonts: !args.no_system_fonts,
    };

    let base_dir = args.input.parent().unwrap_or_else(|| Path::new("."));
    let items = MessagesFile::load(&args.input)?.into_items(base_dir)?;

    let options = StackOptions {
        width: args.width,
        max_width: args.max_width,
    };
    let renderer = MessageRenderer::new(config, sources);
    let extension = renderer.exporter().extension();
    if args.output.extension().and_then(|ext| ext.to_str()) != Some(extension) {
        log::warn!(
            "{} will hold {} data",
            args.output.display(),
            renderer.exporter().mime_type()
        );
    }
    let png = renderer.render_stack(&items, &options).context("Failed to encode PNG")?;

    fs::write(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Rendered {} message(s) to {} ({} bytes)",
        items.len(),
        args.output.display(),
        png.len()
    );
    Ok(())
}
