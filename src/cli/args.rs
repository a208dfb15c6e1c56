//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, ColorMode, Preprocess};
use crate::convert::ConversionConfig;

/// Parse a brightness/contrast factor (0.1-2.0).
fn parse_factor(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.1..=2.0).contains(&v) {
        return Err(format!("Value must be between 0.1 and 2.0, got {}", v));
    }
    Ok(v)
}

/// Parse and validate an image size in WIDTHxHEIGHT format.
pub fn parse_resolution(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid size format '{}'. Use WIDTHxHEIGHT (e.g., 640x480)",
            s
        ));
    }
    let width: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid width '{}' in size", parts[0]))?;
    let height: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid height '{}' in size", parts[1]))?;
    if width == 0 || height == 0 {
        return Err("Size width and height must be greater than 0".to_string());
    }
    Ok((width, height))
}

/// Convert raw RGB frames into glyph art
#[derive(Parser, Debug)]
#[command(name = "ascii-wallpaper")]
#[command(version, about = "Convert raw RGB images into ASCII art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Raw interleaved RGB (or RGBA with --rgba) pixel file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Source image size in pixels (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_resolution)]
    pub size: Option<(u32, u32)>,

    /// Input has 4 bytes per pixel
    #[arg(long)]
    pub rgba: bool,

    /// Write the text here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Width in characters
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Height in characters
    #[arg(long)]
    pub height: Option<u32>,

    /// Sample per-cell colors
    #[arg(short, long)]
    pub color: bool,

    /// Color scheme for sampled colors
    #[arg(long)]
    pub colormode: Option<ColorMode>,

    /// Character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Custom ramp, densest glyph first (overrides --charset)
    #[arg(long)]
    pub custom_charset: Option<String>,

    /// Brightness adjustment (0.1-2.0)
    #[arg(short, long, value_parser = parse_factor)]
    pub brightness: Option<f32>,

    /// Contrast adjustment (0.1-2.0)
    #[arg(long, value_parser = parse_factor)]
    pub contrast: Option<f32>,

    /// Invert character mapping
    #[arg(long)]
    pub invert: bool,

    /// Pick stroke glyphs along detected edges
    #[arg(short, long)]
    pub directional: bool,

    /// Preprocessing filter
    #[arg(long)]
    pub preprocess: Option<Preprocess>,

    /// Derive the grid from the output pixel size and font size
    #[arg(long)]
    pub high_density: bool,

    /// Density multiplier for high-density mode
    #[arg(long)]
    pub density_factor: Option<f32>,

    /// Keep the source aspect ratio when deriving grid dimensions
    #[arg(short, long)]
    pub keepdims: bool,

    /// Target output width in pixels (high-density mode)
    #[arg(long)]
    pub outputwidth: Option<u32>,

    /// Target output height in pixels (high-density mode)
    #[arg(long)]
    pub outputheight: Option<u32>,

    /// Font size used to estimate the glyph cell
    #[arg(long)]
    pub fontsize: Option<f32>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Overlay command-line values on top of file configuration.
    pub fn apply(&self, cfg: &mut ConversionConfig) {
        if self.width.is_some() {
            cfg.width = self.width;
        }
        if self.height.is_some() {
            cfg.height = self.height;
        }
        if let Some(mode) = self.colormode {
            cfg.color_scheme = mode.into();
        }
        if let Some(set) = self.charset {
            cfg.charset = set.into();
        }
        if self.custom_charset.is_some() {
            cfg.custom_charset = self.custom_charset.clone();
        }
        if let Some(b) = self.brightness {
            cfg.brightness = b;
        }
        if let Some(c) = self.contrast {
            cfg.contrast = c;
        }
        if let Some(p) = self.preprocess {
            cfg.preprocess = p.into();
        }
        if let Some(d) = self.density_factor {
            cfg.density_factor = d;
        }
        if self.outputwidth.is_some() {
            cfg.output_width = self.outputwidth;
        }
        if self.outputheight.is_some() {
            cfg.output_height = self.outputheight;
        }
        if let Some(f) = self.fontsize {
            cfg.font_size = f;
        }
        cfg.color |= self.color;
        cfg.invert |= self.invert;
        cfg.directional |= self.directional;
        cfg.high_density |= self.high_density;
        cfg.keepdims |= self.keepdims;
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
