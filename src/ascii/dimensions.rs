//! Grid planning: how many glyph rows and columns to emit, and which source
//! pixels each cell covers.
//!
//! Glyph cells are taller than they are wide, so a naive pixel-to-character
//! mapping stretches the image vertically. Whenever a dimension is derived
//! from the source aspect ratio it is multiplied by the correction factor
//! `A = cell_width / cell_height` (about 0.6 for typical monospace fonts).

use std::ops::Range;

use crate::error::{ConfigError, ConvertError, ValidationError};

/// Grid columns used when no width is requested.
pub const DEFAULT_COLUMNS: u32 = 100;

/// Grid rows used when no height is requested.
pub const DEFAULT_ROWS: u32 = 50;

/// Width of a glyph relative to its font size.
pub const FONT_WIDTH_RATIO: f32 = 0.6;

/// Pixel footprint of one glyph cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    width: f32,
    height: f32,
}

impl CellMetrics {
    /// Measured cell size in pixels. Both sides must be positive and finite.
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCellSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Estimate the cell from a font size: glyphs are ~60% as wide as tall.
    pub fn from_font_size(font_size: f32) -> Result<Self, ConfigError> {
        Self::new(font_size * FONT_WIDTH_RATIO, font_size)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Aspect correction constant `A = width / height`.
    pub fn aspect_correction(&self) -> f32 {
        self.width / self.height
    }
}

/// How the grid dimensions are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Explicit character counts; a missing side is derived (keep-aspect)
    /// or falls back to [`DEFAULT_COLUMNS`] / [`DEFAULT_ROWS`].
    Fixed {
        columns: Option<u32>,
        rows: Option<u32>,
    },
    /// Counts derived from a target output size in pixels, the glyph
    /// footprint and a density multiplier. A missing target side falls back
    /// to the source image size.
    HighDensity {
        target_width: Option<u32>,
        target_height: Option<u32>,
        density_factor: f32,
    },
}

/// Everything [`plan`] needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRequest {
    pub image_width: u32,
    pub image_height: u32,
    pub cell: CellMetrics,
    pub sizing: Sizing,
    pub keep_aspect: bool,
    /// Overrides the aspect correction derived from `cell`.
    pub aspect_correction: Option<f32>,
}

/// Resolved grid dimensions and source sampling geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    pub rows: u32,
    pub cols: u32,
    /// Source pixels per column (fractional)
    pub sample_region_w: f64,
    /// Source pixels per row (fractional)
    pub sample_region_h: f64,
    image_width: u32,
    image_height: u32,
}

impl GridPlan {
    /// Build a plan for fixed dimensions.
    pub fn new(
        image_width: u32,
        image_height: u32,
        cols: u32,
        rows: u32,
    ) -> Result<Self, ValidationError> {
        if image_width == 0 || image_height == 0 {
            return Err(ValidationError::EmptyImage {
                width: image_width,
                height: image_height,
            });
        }
        if cols == 0 || rows == 0 {
            return Err(ValidationError::EmptyGrid { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            sample_region_w: image_width as f64 / cols as f64,
            sample_region_h: image_height as f64 / rows as f64,
            image_width,
            image_height,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Left pixel edge of column `i`: `round(i * sample_region_w)`.
    ///
    /// Computed per index so rounding never accumulates across the row.
    pub fn column_boundary(&self, i: u32) -> u32 {
        boundary(i, self.sample_region_w, self.image_width)
    }

    /// Top pixel edge of row `i`: `round(i * sample_region_h)`.
    pub fn row_boundary(&self, i: u32) -> u32 {
        boundary(i, self.sample_region_h, self.image_height)
    }

    /// Source pixel columns covered by grid column `col`.
    ///
    /// When the grid is finer than the image each cell samples the single
    /// pixel under its center, so cells split evenly across source pixels.
    pub fn column_span(&self, col: u32) -> Range<u32> {
        span(col, self.sample_region_w, self.image_width)
    }

    /// Source pixel rows covered by grid row `row`.
    pub fn row_span(&self, row: u32) -> Range<u32> {
        span(row, self.sample_region_h, self.image_height)
    }
}

fn boundary(i: u32, region: f64, limit: u32) -> u32 {
    ((i as f64 * region).round() as u32).min(limit)
}

fn span(i: u32, region: f64, limit: u32) -> Range<u32> {
    if region < 1.0 {
        let center = (((i as f64 + 0.5) * region).floor() as u32).min(limit - 1);
        return center..center + 1;
    }
    boundary(i, region, limit)..boundary(i + 1, region, limit)
}

/// Compute the grid for `request`.
///
/// Glyph cells are taller than wide, so whenever a dimension is derived from
/// the source aspect ratio it is scaled by `A = cell_width / cell_height`
/// (or the request's explicit override). Pure function: identical requests
/// always yield identical plans.
///
/// # Arguments
/// * `request` - Image size, glyph cell metrics and the sizing strategy
///
/// # Returns
/// A [`GridPlan`] with at least one row and column, or an error when the
/// image is empty, the density factor is not positive, or the derived grid
/// collapses to zero cells.
///
/// # Example
/// ```
/// use ascii_wallpaper::ascii::{plan, CellMetrics, GridRequest, Sizing};
///
/// // 640x480 at 80 columns with 6x12 cells: 80 * 0.75 * 0.5 = 30 rows
/// let request = GridRequest {
///     image_width: 640,
///     image_height: 480,
///     cell: CellMetrics::new(6.0, 12.0).unwrap(),
///     sizing: Sizing::Fixed { columns: Some(80), rows: None },
///     keep_aspect: true,
///     aspect_correction: None,
/// };
/// let grid = plan(&request).unwrap();
/// assert_eq!((grid.cols, grid.rows), (80, 30));
/// ```
pub fn plan(request: &GridRequest) -> Result<GridPlan, ConvertError> {
    let GridRequest {
        image_width,
        image_height,
        cell,
        sizing,
        keep_aspect,
        aspect_correction,
    } = *request;

    if image_width == 0 || image_height == 0 {
        return Err(ValidationError::EmptyImage {
            width: image_width,
            height: image_height,
        }
        .into());
    }

    let correction = match aspect_correction {
        Some(a) if a.is_finite() && a > 0.0 => a,
        Some(a) => return Err(ConfigError::InvalidAspectCorrection(a).into()),
        None => cell.aspect_correction(),
    };

    // rows per column that reproduce the source aspect on screen
    let rows_per_col = image_height as f64 / image_width as f64 * correction as f64;

    let (cols, rows) = match sizing {
        Sizing::Fixed { columns, rows } => match (columns, rows, keep_aspect) {
            (Some(c), Some(r), _) => (c, r),
            (Some(c), None, true) => (c, (c as f64 * rows_per_col).round() as u32),
            (None, Some(r), true) => ((r as f64 / rows_per_col).round() as u32, r),
            (None, None, true) => (
                DEFAULT_COLUMNS,
                (DEFAULT_COLUMNS as f64 * rows_per_col).round() as u32,
            ),
            (c, r, false) => (c.unwrap_or(DEFAULT_COLUMNS), r.unwrap_or(DEFAULT_ROWS)),
        },
        Sizing::HighDensity {
            target_width,
            target_height,
            density_factor,
        } => {
            if !(density_factor.is_finite() && density_factor > 0.0) {
                return Err(ConfigError::NonPositiveDensity(density_factor).into());
            }
            let target_w = target_width.unwrap_or(image_width) as f64;
            let target_h = target_height.unwrap_or(image_height) as f64;
            let density = density_factor as f64;

            let cols = (target_w / cell.width() as f64 * density).floor() as u32;
            let rows = if keep_aspect {
                (cols as f64 * rows_per_col).round() as u32
            } else {
                (target_h / cell.height() as f64 * density).floor() as u32
            };
            (cols, rows)
        }
    };

    let grid = GridPlan::new(image_width, image_height, cols, rows)?;

    log::debug!(
        "Planned {}x{} grid for {}x{} image (keep_aspect={}, A={:.3}, region={:.2}x{:.2})",
        grid.cols,
        grid.rows,
        image_width,
        image_height,
        keep_aspect,
        correction,
        grid.sample_region_w,
        grid.sample_region_h
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> CellMetrics {
        CellMetrics::new(6.0, 12.0).unwrap()
    }

    #[test]
    fn test_boundaries_do_not_drift() {
        // 10 px into 3 columns: 3.33 px each
        let plan = GridPlan::new(10, 1, 3, 1).unwrap();
        assert_eq!(plan.column_boundary(0), 0);
        assert_eq!(plan.column_boundary(1), 3);
        assert_eq!(plan.column_boundary(2), 7);
        assert_eq!(plan.column_boundary(3), 10);
    }

    #[test]
    fn test_upsampled_cells_are_never_empty() {
        let plan = GridPlan::new(2, 2, 8, 8).unwrap();
        for c in 0..8 {
            assert_eq!(plan.column_span(c).len(), 1);
        }
        assert_eq!(plan.column_span(7), 1..2);
    }

    #[test]
    fn test_upsampled_cells_split_evenly() {
        let plan = GridPlan::new(2, 1, 8, 1).unwrap();
        let spans: Vec<_> = (0..8).map(|c| plan.column_span(c)).collect();
        assert_eq!(spans[..4], [0..1, 0..1, 0..1, 0..1]);
        assert_eq!(spans[4..], [1..2, 1..2, 1..2, 1..2]);

        // 3 px into 4 rows: centers at 0.375, 1.125, 1.875, 2.625
        let plan = GridPlan::new(1, 3, 1, 4).unwrap();
        let rows: Vec<_> = (0..4).map(|r| plan.row_span(r).start).collect();
        assert_eq!(rows, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_invalid_cell_size() {
        assert!(CellMetrics::new(0.0, 12.0).is_err());
        assert!(CellMetrics::new(6.0, -1.0).is_err());
        assert!(CellMetrics::from_font_size(f32::NAN).is_err());
    }

    #[test]
    fn test_bad_aspect_override() {
        let req = GridRequest {
            image_width: 100,
            image_height: 100,
            cell: cell(),
            sizing: Sizing::Fixed {
                columns: Some(10),
                rows: None,
            },
            keep_aspect: true,
            aspect_correction: Some(0.0),
        };
        assert!(matches!(
            plan(&req),
            Err(ConvertError::Config(ConfigError::InvalidAspectCorrection(_)))
        ));
    }
}
