//! Color schemes applied to sampled cell colors.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::grid::Rgb;
use crate::error::ConfigError;
use crate::raster::luma;

/// Maximum gain applied by [`ColorScheme::Neon`], as a fraction (x1.5).
const NEON_GAIN_NUM: u32 = 3;
const NEON_GAIN_DEN: u32 = 2;

/// Transformation from a cell's mean color to its output color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ColorScheme {
    /// Sampled color unchanged
    #[default]
    FullRgb,
    /// Blend 30% toward white
    Pastel,
    /// Scale up so the strongest channel approaches 255
    Neon,
    /// BT.601 luma on every channel
    Grayscale,
}

impl ColorScheme {
    pub fn apply(&self, color: Rgb) -> Rgb {
        let Rgb { r, g, b } = color;
        match self {
            ColorScheme::FullRgb => color,
            ColorScheme::Pastel => {
                let soften = |c: u8| ((c as u32 * 7 + 765) / 10) as u8;
                Rgb::new(soften(r), soften(g), soften(b))
            }
            ColorScheme::Neon => {
                let peak = r.max(g).max(b);
                if peak == 0 {
                    return Rgb::new(0, 0, 0);
                }
                let peak = peak as u32;
                let boost = |c: u8| {
                    let c = c as u32;
                    if peak * NEON_GAIN_NUM >= 255 * NEON_GAIN_DEN {
                        (c * 255 / peak) as u8
                    } else {
                        (c * NEON_GAIN_NUM / NEON_GAIN_DEN) as u8
                    }
                };
                Rgb::new(boost(r), boost(g), boost(b))
            }
            ColorScheme::Grayscale => {
                let y = luma(r, g, b);
                Rgb::new(y, y, y)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::FullRgb => "full_rgb",
            ColorScheme::Pastel => "pastel",
            ColorScheme::Neon => "neon",
            ColorScheme::Grayscale => "grayscale",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "full_rgb" => Ok(ColorScheme::FullRgb),
            "pastel" => Ok(ColorScheme::Pastel),
            "neon" => Ok(ColorScheme::Neon),
            "grayscale" => Ok(ColorScheme::Grayscale),
            _ => Err(ConfigError::UnknownColorScheme(s.to_string())),
        }
    }
}

impl TryFrom<String> for ColorScheme {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
