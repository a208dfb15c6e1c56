//! Decoded raster images and ITU-R BT.601 grayscale conversion.

use crate::error::ValidationError;

/// Channel layout of a raster buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel: R, G, B
    Rgb,
    /// 4 bytes per pixel: R, G, B, A
    Rgba,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// An immutable, row-major RGB(A) image.
///
/// Construction validates the dimensions against the buffer length, so every
/// accessor can index without bounds surprises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap a decoded buffer.
    ///
    /// Fails if either dimension is zero or if `data` does not hold exactly
    /// `width * height * channels` bytes.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::EmptyImage { width, height });
        }

        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(ValidationError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Wrap an interleaved RGB buffer.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ValidationError> {
        Self::new(width, height, PixelFormat::Rgb, data)
    }

    /// Wrap an interleaved RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ValidationError> {
        Self::new(width, height, PixelFormat::Rgba, data)
    }

    /// An image filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, ValidationError> {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::from_rgb(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Raw interleaved bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// RGB triple at `(x, y)`. Alpha, if present, is ignored.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the image.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = y as usize * self.stride() + x as usize * self.channels();
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Build a new image of the same size and format from a replacement
    /// buffer. Used by the preprocessor, which never mutates in place.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            format: self.format,
            data,
        }
    }

    /// Grayscale copy of the image, one byte per pixel.
    pub fn to_grayscale(&self) -> Vec<u8> {
        let mut gray = Vec::with_capacity(self.width as usize * self.height as usize);
        for px in self.data.chunks_exact(self.channels()) {
            gray.push(luma(px[0], px[1], px[2]));
        }
        gray
    }
}

/// ITU-R BT.601 luminance: Y = 0.299*R + 0.587*G + 0.114*B.
///
/// Integer math with the coefficients scaled by 1000, so pure white maps to
/// exactly 255.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}
