//! End-to-end conversion: preprocess, plan, analyze, map.

use rayon::prelude::*;
use serde::Deserialize;

use crate::ascii::{
    analyze, map_glyph, plan, preprocess, validate_adjustment, AnalyzeOptions, Cell, CellMetrics,
    CharSet, CharacterRamp, ColorScheme, Grid, GridPlan, GridRequest, PreprocessMode, Sizing,
    DEFAULT_GRADIENT_THRESHOLD,
};
use crate::error::{ConfigError, ConvertError};
use crate::perf::{timed, Instrumentation, Stage};
use crate::raster::RasterImage;

/// Font size assumed when none is configured.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Where the glyph cell footprint comes from.
///
/// Font loading happens elsewhere; the engine only needs the resolved size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphMetrics {
    /// Estimate from a font size (width = 0.6 x size, height = size)
    FontSize(f32),
    /// Measured cell size in pixels
    Explicit { width: f32, height: f32 },
}

impl GlyphMetrics {
    pub fn resolve(&self) -> Result<CellMetrics, ConfigError> {
        match *self {
            GlyphMetrics::FontSize(size) => CellMetrics::from_font_size(size),
            GlyphMetrics::Explicit { width, height } => CellMetrics::new(width, height),
        }
    }
}

/// All tunables for one conversion run.
///
/// Field names double as the keys of the `[conversion]` table in the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Grid columns
    pub width: Option<u32>,
    /// Grid rows
    pub height: Option<u32>,
    pub color: bool,
    pub color_scheme: ColorScheme,
    pub charset: CharSet,
    /// Overrides `charset` with a user ramp, darkest glyph first
    pub custom_charset: Option<String>,
    pub brightness: f32,
    pub contrast: f32,
    pub invert: bool,
    pub directional: bool,
    pub preprocess: PreprocessMode,
    pub high_density: bool,
    pub density_factor: f32,
    pub keepdims: bool,
    pub output_width: Option<u32>,
    pub output_height: Option<u32>,
    pub font_size: f32,
    /// Measured glyph cell width in pixels; needs `cell_height` too
    pub cell_width: Option<f32>,
    pub cell_height: Option<f32>,
    /// Overrides the `cell_width / cell_height` aspect correction
    pub aspect_correction: Option<f32>,
    pub gradient_threshold: f32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            color: false,
            color_scheme: ColorScheme::default(),
            charset: CharSet::default(),
            custom_charset: None,
            brightness: 1.0,
            contrast: 1.0,
            invert: false,
            directional: false,
            preprocess: PreprocessMode::None,
            high_density: false,
            density_factor: 1.0,
            keepdims: false,
            output_width: None,
            output_height: None,
            font_size: DEFAULT_FONT_SIZE,
            cell_width: None,
            cell_height: None,
            aspect_correction: None,
            gradient_threshold: DEFAULT_GRADIENT_THRESHOLD,
        }
    }
}

impl ConversionConfig {
    /// Glyph metrics strategy: measured size if both sides are set,
    /// otherwise the font-size estimate. [`validate`](Self::validate)
    /// rejects a half-specified cell size.
    pub fn glyph_metrics(&self) -> GlyphMetrics {
        match (self.cell_width, self.cell_height) {
            (Some(width), Some(height)) => GlyphMetrics::Explicit { width, height },
            _ => GlyphMetrics::FontSize(self.font_size),
        }
    }

    /// The ramp selected by `custom_charset` or `charset`.
    pub fn ramp(&self) -> Result<CharacterRamp, ConfigError> {
        match &self.custom_charset {
            Some(custom) => CharacterRamp::new(custom),
            None => self.charset.ramp(),
        }
    }

    pub fn sizing(&self) -> Sizing {
        if self.high_density {
            Sizing::HighDensity {
                target_width: self.output_width,
                target_height: self.output_height,
                density_factor: self.density_factor,
            }
        } else {
            Sizing::Fixed {
                columns: self.width,
                rows: self.height,
            }
        }
    }

    /// Check every setting that does not depend on the image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_adjustment("brightness", self.brightness)?;
        validate_adjustment("contrast", self.contrast)?;
        if !(self.density_factor.is_finite() && self.density_factor > 0.0) {
            return Err(ConfigError::NonPositiveDensity(self.density_factor));
        }
        if !(self.gradient_threshold.is_finite() && self.gradient_threshold >= 0.0) {
            return Err(ConfigError::InvalidGradientThreshold(self.gradient_threshold));
        }
        if self.cell_width.is_some() != self.cell_height.is_some() {
            return Err(ConfigError::IncompleteCellSize);
        }
        if let Some(a) = self.aspect_correction {
            if !(a.is_finite() && a > 0.0) {
                return Err(ConfigError::InvalidAspectCorrection(a));
            }
        }
        self.glyph_metrics().resolve()?;
        self.ramp()?;
        Ok(())
    }
}

/// Output of a conversion: the grid plus the plan that shaped it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub grid: Grid,
    pub plan: GridPlan,
}

impl Conversion {
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }
}

/// A validated configuration, ready to convert any number of images.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConversionConfig,
    ramp: CharacterRamp,
    cell: CellMetrics,
}

impl Converter {
    /// Validate `config` and resolve its ramp and glyph metrics.
    ///
    /// Configuration errors, including an empty ramp, surface here rather
    /// than per cell.
    pub fn new(config: ConversionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ramp = config.ramp()?;
        let cell = config.glyph_metrics().resolve()?;

        if config.directional && ramp.directional().is_none() {
            log::info!(
                "Ramp '{}' has no directional table; directional mode uses the plain ramp",
                ramp
            );
        }

        Ok(Self { config, ramp, cell })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn ramp(&self) -> &CharacterRamp {
        &self.ramp
    }

    /// Grid request for an image of the given size.
    pub fn request(&self, image_width: u32, image_height: u32) -> GridRequest {
        GridRequest {
            image_width,
            image_height,
            cell: self.cell,
            sizing: self.config.sizing(),
            keep_aspect: self.config.keepdims,
            aspect_correction: self.config.aspect_correction,
        }
    }

    /// Convert `image` into a glyph grid.
    pub fn convert(&self, image: &RasterImage) -> Result<Conversion, ConvertError> {
        self.convert_with(image, None)
    }

    /// Convert `image`, recording stage timings into `instrumentation`.
    pub fn convert_with(
        &self,
        image: &RasterImage,
        mut instrumentation: Option<&mut Instrumentation>,
    ) -> Result<Conversion, ConvertError> {
        let cfg = &self.config;
        log::debug!(
            "Converting {}x{} image (charset={}, color={}, directional={}, invert={})",
            image.width(),
            image.height(),
            self.ramp,
            cfg.color,
            cfg.directional,
            cfg.invert
        );

        let processed = timed(&mut instrumentation, Stage::Preprocess, || {
            preprocess(image, cfg.preprocess, cfg.brightness, cfg.contrast)
        });

        let request = self.request(processed.width(), processed.height());
        let grid_plan = timed(&mut instrumentation, Stage::Plan, || plan(&request))?;

        let options = AnalyzeOptions {
            color: cfg.color,
            directional: cfg.directional,
            gradient_threshold: cfg.gradient_threshold,
        };
        let samples = timed(&mut instrumentation, Stage::Analyze, || {
            analyze(&processed, &grid_plan, &options)
        })?;

        let cells: Vec<Cell> = timed(&mut instrumentation, Stage::Map, || {
            samples
                .par_iter()
                .map(|s| Cell {
                    glyph: map_glyph(
                        s.intensity,
                        s.direction,
                        &self.ramp,
                        cfg.invert,
                        cfg.directional,
                    ),
                    color: s.color.map(|c| cfg.color_scheme.apply(c)),
                    intensity: s.intensity,
                    direction: s.direction,
                })
                .collect()
        });

        let grid = Grid::new(grid_plan.rows, grid_plan.cols, cells)?;
        log::debug!("Produced {}x{} glyph grid", grid.cols(), grid.rows());

        Ok(Conversion {
            grid,
            plan: grid_plan,
        })
    }
}

/// One-shot conversion with a fresh [`Converter`].
pub fn convert(image: &RasterImage, config: &ConversionConfig) -> Result<Conversion, ConvertError> {
    Converter::new(config.clone())?.convert(image)
}
