//! Error types for the conversion engine.
//!
//! Every error here is fatal: the pipeline is pure and deterministic, so a
//! failure always means a bad configuration or a bad input buffer.

use std::path::PathBuf;

/// Configuration errors, raised before any pixel is touched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Character ramp must contain at least one glyph")]
    EmptyRamp,

    #[error("Unknown preprocess mode '{0}'. Available modes: none, edge, sharpen, contrast")]
    UnknownPreprocessMode(String),

    #[error("Unknown character set '{0}'")]
    UnknownCharset(String),

    #[error("Unknown color scheme '{0}'. Available schemes: full_rgb, pastel, neon, grayscale")]
    UnknownColorScheme(String),

    #[error("Density factor must be greater than 0, got {0}")]
    NonPositiveDensity(f32),

    #[error("Glyph cell size must be positive, got {width}x{height}")]
    InvalidCellSize { width: f32, height: f32 },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("cell_width and cell_height must be set together")]
    IncompleteCellSize,

    #[error("Aspect correction must be positive, got {0}")]
    InvalidAspectCorrection(f32),

    #[error("Gradient threshold must be non-negative, got {0}")]
    InvalidGradientThreshold(f32),

    #[error("Directional glyph '{0}' is not part of its ramp")]
    DirectionalGlyphNotInRamp(char),

    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Input or derived-dimension errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Computed grid is empty ({cols} columns x {rows} rows)")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("Grid plan is for a {plan_width}x{plan_height} image, got {image_width}x{image_height}")]
    PlanMismatch {
        plan_width: u32,
        plan_height: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// Any error the conversion pipeline can surface.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
