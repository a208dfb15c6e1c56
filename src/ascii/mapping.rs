//! Intensity (and direction) to glyph mapping.

use super::charset::{CharacterRamp, DIRECTIONAL_TIERS};
use super::edges::Direction;

/// Clamp an intensity into `[0, 1]`, treating NaN as black.
#[inline]
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Ramp index for `intensity`: `floor(i * (len - 1))`, clamped.
///
/// Index 0 covers the lowest `1 / (len - 1)` band of intensities, while the
/// last index is reached only at intensity 1. The index never decreases as
/// intensity increases.
#[inline]
pub fn ramp_index(intensity: f32, levels: usize, invert: bool) -> usize {
    if levels <= 1 {
        return 0;
    }
    let i = clamp_intensity(intensity);
    let i = if invert { 1.0 - i } else { i };
    ((i * (levels - 1) as f32).floor() as usize).min(levels - 1)
}

/// Coarse intensity tier for directional tables, `0..DIRECTIONAL_TIERS`.
#[inline]
pub fn intensity_tier(intensity: f32, invert: bool) -> usize {
    let i = clamp_intensity(intensity);
    let i = if invert { 1.0 - i } else { i };
    ((i * DIRECTIONAL_TIERS as f32).floor() as usize).min(DIRECTIONAL_TIERS - 1)
}

/// Pick the glyph for one cell.
///
/// With `directional` set and an edge detected, the ramp's directional table
/// wins if it defines an entry for `(direction, tier)`; otherwise, and for
/// ramps without a table, the plain ramp glyph is used.
///
/// # Arguments
/// * `intensity` - Cell brightness in `[0, 1]`; out-of-range values are clamped
/// * `direction` - Gradient direction detected in the cell
/// * `ramp` - Glyph ramp, darkest glyph first
/// * `invert` - Map bright cells to dense glyphs instead
/// * `directional` - Allow stroke glyphs from the ramp's directional table
///
/// # Returns
/// A glyph that is always a member of `ramp`.
///
/// # Example
/// ```
/// use ascii_wallpaper::ascii::{map_glyph, CharSet, Direction};
///
/// let standard = CharSet::Standard.ramp().unwrap();
/// assert_eq!(map_glyph(0.5, Direction::None, &standard, false, false), '+');
///
/// let manga = CharSet::Manga.ramp().unwrap();
/// assert_eq!(map_glyph(0.3, Direction::DiagForward, &manga, false, true), '/');
/// ```
pub fn map_glyph(
    intensity: f32,
    direction: Direction,
    ramp: &CharacterRamp,
    invert: bool,
    directional: bool,
) -> char {
    if directional && direction != Direction::None {
        if let Some(glyph) = ramp
            .directional()
            .and_then(|table| table.glyph(direction, intensity_tier(intensity, invert)))
        {
            return glyph;
        }
    }

    ramp.glyph(ramp_index(intensity, ramp.len(), invert))
}

/// Map a run of intensities with no directional substitution.
///
/// # Example
/// ```
/// use ascii_wallpaper::ascii::{map_to_chars, CharacterRamp};
///
/// let ramp = CharacterRamp::new("@#. ").unwrap();
/// assert_eq!(map_to_chars(&[0.0, 0.5, 1.0], &ramp, false), vec!['@', '#', ' ']);
/// ```
pub fn map_to_chars(intensities: &[f32], ramp: &CharacterRamp, invert: bool) -> Vec<char> {
    intensities
        .iter()
        .map(|&i| map_glyph(i, Direction::None, ramp, invert, false))
        .collect()
}
