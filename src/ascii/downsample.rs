//! Per-cell analysis: mean intensity, mean color and gradient direction
//! over each cell's source rectangle.
//!
//! Cells are analyzed in parallel. Each reads only its own rectangle of the
//! shared grayscale/RGB buffers and produces one sample; results are
//! collected in grid order, so completion order never affects placement.

use rayon::prelude::*;

use super::dimensions::GridPlan;
use super::edges::{
    classify_gradient, mean_gradient, Direction, PixelRect, DEFAULT_GRADIENT_THRESHOLD,
};
use super::grid::Rgb;
use crate::error::ValidationError;
use crate::raster::RasterImage;

/// What to compute for each cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeOptions {
    /// Sample the mean RGB color
    pub color: bool,
    /// Detect the dominant gradient direction
    pub directional: bool,
    /// Minimum averaged gradient magnitude for an edge
    pub gradient_threshold: f32,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            color: false,
            directional: false,
            gradient_threshold: DEFAULT_GRADIENT_THRESHOLD,
        }
    }
}

/// Analysis result for one cell, before glyph assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSample {
    /// Mean luma normalized to `[0, 1]`
    pub intensity: f32,
    pub color: Option<Rgb>,
    pub direction: Direction,
}

/// Source rectangle `[col_span) x [row_span)` of cell `(row, col)`.
pub fn cell_rect(plan: &GridPlan, row: u32, col: u32) -> PixelRect {
    let xs = plan.column_span(col);
    let ys = plan.row_span(row);
    PixelRect {
        x0: xs.start,
        y0: ys.start,
        x1: xs.end,
        y1: ys.end,
    }
}

/// Analyze one cell. `gray` must be `image.to_grayscale()`.
pub fn analyze_cell(
    image: &RasterImage,
    gray: &[u8],
    rect: &PixelRect,
    options: &AnalyzeOptions,
) -> CellSample {
    let width = image.width();
    let count = rect.area().max(1);

    let mut luma_sum = 0u64;
    let mut rgb_sum = [0u64; 3];

    for y in rect.y0..rect.y1 {
        let row = &gray[(y * width) as usize..((y + 1) * width) as usize];
        for x in rect.x0..rect.x1 {
            luma_sum += row[x as usize] as u64;
            if options.color {
                let [r, g, b] = image.rgb(x, y);
                rgb_sum[0] += r as u64;
                rgb_sum[1] += g as u64;
                rgb_sum[2] += b as u64;
            }
        }
    }

    let intensity = (luma_sum as f64 / count as f64 / 255.0).clamp(0.0, 1.0) as f32;

    let color = options.color.then(|| {
        let n = count as u64;
        let mean = |s: u64| ((s + n / 2) / n) as u8;
        Rgb::new(mean(rgb_sum[0]), mean(rgb_sum[1]), mean(rgb_sum[2]))
    });

    let direction = if options.directional {
        let (gx, gy) = mean_gradient(gray, width, rect);
        classify_gradient(gx, gy, options.gradient_threshold)
    } else {
        Direction::None
    };

    CellSample {
        intensity,
        color,
        direction,
    }
}

/// Analyze every cell of `plan`, returning samples in row-major order.
///
/// Cells are analyzed in parallel; each reads only the pixels of its own
/// source rectangle, so the result does not depend on scheduling.
///
/// # Arguments
/// * `image` - Preprocessed image the plan was computed for
/// * `plan` - Grid geometry from [`plan`](super::plan)
/// * `options` - Which optional measurements (color, direction) to take
///
/// # Returns
/// `plan.rows * plan.cols` samples, or [`ValidationError::PlanMismatch`]
/// when the plan was built for a different image size.
///
/// # Example
/// ```
/// use ascii_wallpaper::ascii::{analyze, AnalyzeOptions, GridPlan};
/// use ascii_wallpaper::RasterImage;
///
/// let image = RasterImage::filled(8, 4, [255, 255, 255]).unwrap();
/// let plan = GridPlan::new(8, 4, 4, 2).unwrap();
/// let samples = analyze(&image, &plan, &AnalyzeOptions::default()).unwrap();
/// assert_eq!(samples.len(), 8);
/// assert!(samples.iter().all(|s| s.intensity == 1.0));
/// ```
pub fn analyze(
    image: &RasterImage,
    plan: &GridPlan,
    options: &AnalyzeOptions,
) -> Result<Vec<CellSample>, ValidationError> {
    if plan.image_width() != image.width() || plan.image_height() != image.height() {
        return Err(ValidationError::PlanMismatch {
            plan_width: plan.image_width(),
            plan_height: plan.image_height(),
            image_width: image.width(),
            image_height: image.height(),
        });
    }

    let gray = image.to_grayscale();
    let cols = plan.cols as usize;

    let samples = (0..plan.cell_count())
        .into_par_iter()
        .map(|i| {
            let rect = cell_rect(plan, (i / cols) as u32, (i % cols) as u32);
            analyze_cell(image, &gray, &rect, options)
        })
        .collect();

    Ok(samples)
}
