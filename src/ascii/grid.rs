//! The finished glyph grid handed to renderers.

use serde::Serialize;

use super::edges::Direction;
use crate::error::ValidationError;

/// 8-bit RGB color of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One resolved grid position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub glyph: char,
    /// Absent for monochrome output
    pub color: Option<Rgb>,
    /// Mean luma of the source region, in `[0, 1]`
    pub intensity: f32,
    pub direction: Direction,
}

/// `rows x cols` cells in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Assemble a grid. `cells.len()` must equal `rows * cols`.
    pub fn new(rows: u32, cols: u32, cells: Vec<Cell>) -> Result<Self, ValidationError> {
        if rows == 0 || cols == 0 {
            return Err(ValidationError::EmptyGrid { rows, cols });
        }
        let expected = rows as usize * cols as usize;
        if cells.len() != expected {
            return Err(ValidationError::BufferSize {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Iterate rows as cell slices, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols as usize)
    }

    /// Glyphs only, one line per row, joined with `\n`.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.glyph));
        }
        out
    }
}
