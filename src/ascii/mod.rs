//! Image-to-glyph conversion engine.
//!
//! The pipeline, leaves first:
//!
//! 1. **Preprocessing** - brightness/contrast and an optional edge, sharpen
//!    or histogram-stretch filter
//! 2. **Grid planning** - glyph grid dimensions and per-cell source regions
//! 3. **Cell analysis** - mean intensity, mean color and gradient direction
//! 4. **Character mapping** - intensity (and direction) to a ramp glyph
//!
//! The result is a [`Grid`] of cells; turning it into text, markup or an
//! image is left to the caller.
//!
//! # Character Sets
//!
//! Built-in ramps are selected via [`CharSet`]:
//! - `Standard`, `Bright`, `Simple` - 10-level ASCII density ramps
//! - `Detailed` - 70-level ramp
//! - `Blocks` - Unicode shade blocks
//! - `Minimal` - 4 levels
//! - `Manga`, `Diagonal` - stroke ramps with directional tables

mod charset;
mod color;
mod dimensions;
mod downsample;
mod edges;
mod grid;
mod mapping;
mod preprocess;

pub use charset::{
    CharSet, CharacterRamp, DirectionalVariant, BLOCKS_CHARSET, BRIGHT_CHARSET, DETAILED_CHARSET,
    DIAGONAL_CHARSET, DIRECTIONAL_TIERS, MANGA_CHARSET, MINIMAL_CHARSET, SIMPLE_CHARSET,
    STANDARD_CHARSET,
};
pub use color::ColorScheme;
pub use dimensions::{
    plan, CellMetrics, GridPlan, GridRequest, Sizing, DEFAULT_COLUMNS, DEFAULT_ROWS,
    FONT_WIDTH_RATIO,
};
pub use downsample::{analyze, analyze_cell, cell_rect, AnalyzeOptions, CellSample};
pub use edges::{
    bucket_angle, classify_gradient, mean_gradient, sobel_at, sobel_magnitude, Direction,
    PixelRect, DEFAULT_GRADIENT_THRESHOLD,
};
pub use grid::{Cell, Grid, Rgb};
pub use mapping::{clamp_intensity, intensity_tier, map_glyph, map_to_chars, ramp_index};
pub use preprocess::{
    adjust, edge_map, preprocess, sharpen, stretch_histogram, validate_adjustment,
    PreprocessMode, ADJUSTMENT_RANGE, SHARPEN_AMOUNT,
};
