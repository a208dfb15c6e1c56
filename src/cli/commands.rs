//! Subcommand handlers: conversion and config actions.

use std::path::{Path, PathBuf};

use super::args::{Args, ConfigAction};
use crate::config::{default_path as get_config_path, Config};
use crate::convert::Converter;
use crate::error::{ConfigError, ConvertError, ValidationError};
use crate::perf::Instrumentation;
use crate::raster::{PixelFormat, RasterImage};

/// Errors surfaced by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Missing --input; pass a raw pixel file or use a subcommand")]
    MissingInput,

    #[error("Missing --size WIDTHxHEIGHT for raw input")]
    MissingSize,

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Load the raw pixel file named by `args`.
fn load_raw(path: &Path, size: (u32, u32), rgba: bool) -> Result<RasterImage, CliError> {
    let data = std::fs::read(path).map_err(|e| CliError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let format = if rgba { PixelFormat::Rgba } else { PixelFormat::Rgb };
    Ok(RasterImage::new(size.0, size.1, format, data)?)
}

/// Convert the input image and print (or write) the plain-text grid.
pub fn run_convert(args: &Args) -> Result<(), CliError> {
    let input = args.input.as_deref().ok_or(CliError::MissingInput)?;
    let size = args.size.ok_or(CliError::MissingSize)?;

    let mut config = Config::load(args.config.as_deref())?.conversion;
    args.apply(&mut config);

    let converter = Converter::new(config)?;
    let image = load_raw(input, size, args.rgba)?;

    let mut inst = Instrumentation::default();
    let result = converter.convert_with(&image, Some(&mut inst))?;
    log::info!(
        "Converted {}x{} image to {}x{} grid in {:.2}ms",
        image.width(),
        image.height(),
        result.cols(),
        result.rows(),
        inst.total().as_secs_f64() * 1000.0
    );

    let text = result.grid.to_plain_text();
    match &args.output {
        Some(path) => std::fs::write(path, text + "\n").map_err(|e| CliError::Write {
            path: path.clone(),
            source: e,
        })?,
        None => println!("{}", text),
    }

    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) {
    let config_path = config_path.map(PathBuf::from).unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            match Config::load(Some(&config_path)) {
                Ok(config) => {
                    let c = &config.conversion;
                    println!("Current configuration:");
                    println!("  Charset: {}", c.charset);
                    println!("  Preprocess: {}", c.preprocess);
                    println!("  Brightness: {}", c.brightness);
                    println!("  Contrast: {}", c.contrast);
                    println!(
                        "  Color: {} ({})",
                        if c.color { "yes" } else { "no" },
                        c.color_scheme
                    );
                    println!("  Directional: {}", if c.directional { "yes" } else { "no" });
                    println!("  High density: {}", if c.high_density { "yes" } else { "no" });
                    println!("  Font size: {}", c.font_size);
                    println!();
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'ascii-wallpaper config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            if let Err(e) = std::fs::write(&config_path, DEFAULT_CONFIG) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

/// Template written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# ascii-wallpaper configuration

[conversion]
# Grid size in characters (default 100x50)
# width = 100
# height = 50
# Character set: standard, bright, detailed, simple, blocks, minimal, manga, diagonal
charset = "standard"
# Custom ramp, densest glyph first (overrides charset)
# custom_charset = "@#. "
# Preprocessing: none, edge, sharpen, contrast
preprocess = "none"
# Linear adjustments (0.1-2.0)
brightness = 1.0
contrast = 1.0
invert = false
# Sample per-cell colors; scheme: full_rgb, pastel, neon, grayscale
color = false
color_scheme = "full_rgb"
# Stroke glyphs along edges (manga and diagonal ramps)
directional = false
gradient_threshold = 20.0
# Derive the grid from output pixel size and font size
high_density = false
density_factor = 1.0
keepdims = false
font_size = 12.0
"#;
