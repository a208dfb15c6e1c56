//! Sobel gradients and direction bucketing for directional rendering.

use rayon::prelude::*;
use serde::Serialize;

/// Default minimum magnitude of a cell's averaged gradient before it
/// counts as an edge, in raw Sobel units (a full 0→255 step is 1020).
pub const DEFAULT_GRADIENT_THRESHOLD: f32 = 20.0;

/// Sobel kernels:
/// ```text
/// Gx:          Gy:
/// [-1  0  1]   [-1 -2 -1]
/// [-2  0  2]   [ 0  0  0]
/// [-1  0  1]   [ 1  2  1]
/// ```
const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Orientation of the dominant intensity gradient in a cell.
///
/// Angles are measured in image coordinates (y grows downward) and folded
/// into `[0°, 180°)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// No significant gradient (smooth area)
    #[default]
    None,
    /// Gradient near 0°/180°: intensity changes left to right
    Horizontal,
    /// Gradient near 90°: intensity changes top to bottom
    Vertical,
    /// Gradient near 45°: contour runs bottom-left to top-right (`/`)
    DiagForward,
    /// Gradient near 135°: contour runs top-left to bottom-right (`\`)
    DiagBack,
}

impl Direction {
    /// The four edge directions, in table order.
    pub const EDGES: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagForward,
        Direction::DiagBack,
    ];

    /// Row of this direction in a directional glyph table, `None` for
    /// [`Direction::None`].
    pub fn table_index(&self) -> Option<usize> {
        match self {
            Direction::None => None,
            Direction::Horizontal => Some(0),
            Direction::Vertical => Some(1),
            Direction::DiagForward => Some(2),
            Direction::DiagBack => Some(3),
        }
    }
}

/// Axis-aligned pixel rectangle, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> u32 {
        self.width() * self.height()
    }
}

/// Sobel response at `(x, y)` with neighbor reads clamped to `rect`.
///
/// Clamping to the rectangle instead of the whole image keeps each cell's
/// analysis dependent on its own pixels only. `gray` is the full-image
/// grayscale buffer with row length `width`.
#[inline]
pub fn sobel_at(gray: &[u8], width: u32, rect: &PixelRect, x: u32, y: u32) -> (i32, i32) {
    let mut gx = 0i32;
    let mut gy = 0i32;

    for ky in 0..3 {
        let py = (y as i64 + ky as i64 - 1).clamp(rect.y0 as i64, rect.y1 as i64 - 1) as usize;
        for kx in 0..3 {
            let px = (x as i64 + kx as i64 - 1).clamp(rect.x0 as i64, rect.x1 as i64 - 1) as usize;
            let val = gray[py * width as usize + px] as i32;
            gx += val * SOBEL_X[ky][kx];
            gy += val * SOBEL_Y[ky][kx];
        }
    }

    (gx, gy)
}

/// Full-image Sobel magnitude `sqrt(gx² + gy²)`, borders clamped.
///
/// Returns one `f32` per pixel in row-major order. Rows are computed in
/// parallel; each writes only its own slice of the output.
pub fn sobel_magnitude(gray: &[u8], width: u32, height: u32) -> Vec<f32> {
    let rect = PixelRect {
        x0: 0,
        y0: 0,
        x1: width,
        y1: height,
    };
    let mut out = vec![0.0f32; width as usize * height as usize];
    out.par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                let (gx, gy) = sobel_at(gray, width, &rect, x as u32, y as u32);
                *slot = ((gx * gx + gy * gy) as f32).sqrt();
            }
        });
    out
}

/// Average Sobel gradient over every pixel of `rect`.
pub fn mean_gradient(gray: &[u8], width: u32, rect: &PixelRect) -> (f32, f32) {
    let mut sum_x = 0i64;
    let mut sum_y = 0i64;

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let (gx, gy) = sobel_at(gray, width, rect, x, y);
            sum_x += gx as i64;
            sum_y += gy as i64;
        }
    }

    let count = rect.area().max(1) as f32;
    (sum_x as f32 / count, sum_y as f32 / count)
}

/// Slack when comparing an angle against a sector boundary, in degrees.
const BOUNDARY_EPSILON: f64 = 1e-3;

/// Bucket a gradient into a [`Direction`].
///
/// Below `threshold` magnitude the cell is smooth. Otherwise the angle is
/// folded into `[0°, 180°)` and handed to [`bucket_angle`].
pub fn classify_gradient(gx: f32, gy: f32, threshold: f32) -> Direction {
    let magnitude = gx.hypot(gy);
    if magnitude.is_nan() || magnitude < threshold || magnitude == 0.0 {
        return Direction::None;
    }

    let mut angle = (gy as f64).atan2(gx as f64).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    if angle >= 180.0 {
        angle -= 180.0;
    }
    bucket_angle(angle)
}

/// Map a folded angle in `[0°, 180°)` to one of four 45° sectors centered
/// on 0°, 45°, 90° and 135°.
///
/// An angle on a sector boundary (within float noise) belongs to the
/// lower-angle sector.
pub fn bucket_angle(degrees: f64) -> Direction {
    let within = |limit: f64| degrees <= limit + BOUNDARY_EPSILON;
    if within(22.5) {
        Direction::Horizontal
    } else if within(67.5) {
        Direction::DiagForward
    } else if within(112.5) {
        Direction::Vertical
    } else if within(157.5) {
        Direction::DiagBack
    } else {
        Direction::Horizontal
    }
}
