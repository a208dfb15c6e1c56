//! CLI enum types for character set, color scheme and preprocess options.

use clap::ValueEnum;

use crate::ascii;

/// Character ramp for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Standard,
    Bright,
    Detailed,
    Simple,
    Blocks,
    Minimal,
    Manga,
    Diagonal,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => ascii::CharSet::Standard,
            CharacterSet::Bright => ascii::CharSet::Bright,
            CharacterSet::Detailed => ascii::CharSet::Detailed,
            CharacterSet::Simple => ascii::CharSet::Simple,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Minimal => ascii::CharSet::Minimal,
            CharacterSet::Manga => ascii::CharSet::Manga,
            CharacterSet::Diagonal => ascii::CharSet::Diagonal,
        }
    }
}

/// Color scheme for sampled cell colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    FullRgb,
    Pastel,
    Neon,
    Grayscale,
}

impl From<ColorMode> for ascii::ColorScheme {
    fn from(c: ColorMode) -> Self {
        match c {
            ColorMode::FullRgb => ascii::ColorScheme::FullRgb,
            ColorMode::Pastel => ascii::ColorScheme::Pastel,
            ColorMode::Neon => ascii::ColorScheme::Neon,
            ColorMode::Grayscale => ascii::ColorScheme::Grayscale,
        }
    }
}

/// Preprocessing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preprocess {
    #[default]
    None,
    Edge,
    Sharpen,
    Contrast,
}

impl From<Preprocess> for ascii::PreprocessMode {
    fn from(p: Preprocess) -> Self {
        match p {
            Preprocess::None => ascii::PreprocessMode::None,
            Preprocess::Edge => ascii::PreprocessMode::Edge,
            Preprocess::Sharpen => ascii::PreprocessMode::Sharpen,
            Preprocess::Contrast => ascii::PreprocessMode::Contrast,
        }
    }
}
