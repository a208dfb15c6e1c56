//! Image preprocessing: linear brightness/contrast plus an optional
//! enhancement filter.
//!
//! Every function here returns a fresh [`RasterImage`]; the input is never
//! modified. Work is split by rows with rayon, each row writing only its own
//! output slice.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::Deserialize;

use super::edges::sobel_magnitude;
use crate::error::ConfigError;
use crate::raster::RasterImage;

/// Weight of the detail layer in the unsharp mask.
pub const SHARPEN_AMOUNT: f32 = 1.0;

/// Accepted range for brightness and contrast factors.
pub const ADJUSTMENT_RANGE: (f32, f32) = (0.1, 2.0);

/// Enhancement filter applied before the linear adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum PreprocessMode {
    #[default]
    None,
    /// Monochrome Sobel edge map
    Edge,
    /// Unsharp mask over a 3x3 box blur
    Sharpen,
    /// Histogram stretch of the observed value range to 0..=255
    Contrast,
}

impl PreprocessMode {
    pub fn name(&self) -> &'static str {
        match self {
            PreprocessMode::None => "none",
            PreprocessMode::Edge => "edge",
            PreprocessMode::Sharpen => "sharpen",
            PreprocessMode::Contrast => "contrast",
        }
    }
}

impl fmt::Display for PreprocessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreprocessMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(PreprocessMode::None),
            "edge" => Ok(PreprocessMode::Edge),
            "sharpen" => Ok(PreprocessMode::Sharpen),
            "contrast" => Ok(PreprocessMode::Contrast),
            _ => Err(ConfigError::UnknownPreprocessMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for PreprocessMode {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Check a brightness or contrast factor against [`ADJUSTMENT_RANGE`].
pub fn validate_adjustment(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    let (min, max) = ADJUSTMENT_RANGE;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Run the enhancement filter for `mode`, then the linear adjustment.
///
/// The linear transform is applied per color channel regardless of mode:
/// `out = clamp((in - 128) * contrast + 128 * brightness, 0, 255)`.
/// Alpha channels pass through untouched.
///
/// # Arguments
/// * `image` - Source image; never modified
/// * `mode` - Enhancement filter to run first
/// * `brightness` - Brightness factor, validated to `0.1..=2.0` by the caller
/// * `contrast` - Contrast factor, validated to `0.1..=2.0` by the caller
///
/// # Returns
/// A new image with the same dimensions and pixel format as `image`.
///
/// # Example
/// ```
/// use ascii_wallpaper::ascii::{preprocess, PreprocessMode};
/// use ascii_wallpaper::RasterImage;
///
/// let image = RasterImage::filled(4, 4, [100, 100, 100]).unwrap();
/// let out = preprocess(&image, PreprocessMode::None, 1.0, 2.0);
/// assert_eq!(out.rgb(0, 0), [72, 72, 72]);
/// ```
pub fn preprocess(
    image: &RasterImage,
    mode: PreprocessMode,
    brightness: f32,
    contrast: f32,
) -> RasterImage {
    let filtered = match mode {
        PreprocessMode::None => None,
        PreprocessMode::Edge => Some(edge_map(image)),
        PreprocessMode::Sharpen => Some(sharpen(image, SHARPEN_AMOUNT)),
        PreprocessMode::Contrast => Some(stretch_histogram(image)),
    };
    let source = filtered.as_ref().unwrap_or(image);

    log::debug!(
        "Preprocessed {}x{} image: mode={}, brightness={}, contrast={}",
        image.width(),
        image.height(),
        mode,
        brightness,
        contrast
    );

    adjust(source, brightness, contrast)
}

/// Linear brightness/contrast adjustment.
pub fn adjust(image: &RasterImage, brightness: f32, contrast: f32) -> RasterImage {
    let channels = image.channels();
    let mut out = image.data().to_vec();

    out.par_chunks_mut(image.stride()).for_each(|row| {
        for px in row.chunks_exact_mut(channels) {
            for c in &mut px[..3] {
                let v = (*c as f32 - 128.0) * contrast + 128.0 * brightness;
                *c = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    image.with_data(out)
}

/// Monochrome edge map: Sobel magnitude of the luma channel, normalized so
/// the strongest edge becomes 255, replicated to R, G and B.
pub fn edge_map(image: &RasterImage) -> RasterImage {
    let width = image.width();
    let gray = image.to_grayscale();
    let magnitude = sobel_magnitude(&gray, width, image.height());

    let peak = magnitude.iter().copied().fold(0.0f32, f32::max);
    let scale = if peak > 0.0 { 255.0 / peak } else { 0.0 };

    let channels = image.channels();
    let mut out = image.data().to_vec();

    out.par_chunks_mut(image.stride())
        .zip(magnitude.par_chunks(width as usize))
        .for_each(|(row, mags)| {
            for (px, &m) in row.chunks_exact_mut(channels).zip(mags) {
                let v = (m * scale).round().clamp(0.0, 255.0) as u8;
                px[0] = v;
                px[1] = v;
                px[2] = v;
            }
        });

    image.with_data(out)
}

/// Unsharp mask: `out = in + amount * (in - blurred)` with a 3x3 box blur
/// whose reads are clamped at the image border.
pub fn sharpen(image: &RasterImage, amount: f32) -> RasterImage {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let channels = image.channels();
    let stride = image.stride();
    let src = image.data();
    let mut out = src.to_vec();

    out.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
        for x in 0..width {
            let cols = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
            for c in 0..3 {
                let mut sum = 0u32;
                for &ny in &rows {
                    for &nx in &cols {
                        sum += src[ny * stride + nx * channels + c] as u32;
                    }
                }
                let blurred = sum as f32 / 9.0;
                let original = src[y * stride + x * channels + c] as f32;
                let v = original + amount * (original - blurred);
                row[x * channels + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    image.with_data(out)
}

/// Stretch the observed `[min, max]` color-channel range to `[0, 255]`.
///
/// A flat image (min == max) is returned unchanged.
pub fn stretch_histogram(image: &RasterImage) -> RasterImage {
    let channels = image.channels();
    let (lo, hi) = image
        .data()
        .chunks_exact(channels)
        .flat_map(|px| px[..3].iter().copied())
        .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if hi <= lo {
        return image.clone();
    }

    let range = (hi - lo) as f32;
    let mut out = image.data().to_vec();

    out.par_chunks_mut(image.stride()).for_each(|row| {
        for px in row.chunks_exact_mut(channels) {
            for c in &mut px[..3] {
                *c = ((*c - lo) as f32 * 255.0 / range).round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    image.with_data(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("edge".parse::<PreprocessMode>().unwrap(), PreprocessMode::Edge);
        assert_eq!(" Sharpen ".parse::<PreprocessMode>().unwrap(), PreprocessMode::Sharpen);
        assert!(matches!(
            "emboss".parse::<PreprocessMode>(),
            Err(ConfigError::UnknownPreprocessMode(m)) if m == "emboss"
        ));
    }

    #[test]
    fn test_adjustment_range() {
        assert!(validate_adjustment("brightness", 1.0).is_ok());
        assert!(validate_adjustment("brightness", 0.1).is_ok());
        assert!(validate_adjustment("contrast", 2.0).is_ok());
        assert!(validate_adjustment("contrast", 2.5).is_err());
        assert!(validate_adjustment("contrast", f32::NAN).is_err());
    }
}
