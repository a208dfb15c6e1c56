//! Character ramps for glyph rendering.
//!
//! Ramps are ordered from darkest-associated (dense glyphs, index 0) to
//! lightest-associated (sparse glyphs, last index), so a black pixel on a
//! white page is drawn with the densest glyph.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::edges::Direction;
use crate::error::ConfigError;

/// Standard density ramp (10 levels).
pub const STANDARD_CHARSET: &str = "@%#*+=-:. ";

/// Standard ramp reversed, for light glyphs on a dark background.
pub const BRIGHT_CHARSET: &str = " .:-=+*#%@";

/// Fine-grained ramp (70 levels).
pub const DETAILED_CHARSET: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Simple ramp (10 levels).
pub const SIMPLE_CHARSET: &str = "#@%*+=-:. ";

/// Unicode block ramp (5 levels).
pub const BLOCKS_CHARSET: &str = "█▓▒░ ";

/// Minimal ramp (4 levels) for a clean look.
pub const MINIMAL_CHARSET: &str = "@:. ";

/// Line-art ramp with stroke glyphs.
pub const MANGA_CHARSET: &str = "█▓▒░@%#*/\\()[]{}=_-+~<>!;:,. ";

/// Box-drawing ramp with stroke glyphs.
pub const DIAGONAL_CHARSET: &str = "\\|/─│┌┐└┘┼▄▀█▓▒░ ";

/// Number of intensity tiers in a directional table.
pub const DIRECTIONAL_TIERS: usize = 4;

type TierRow = [Option<char>; DIRECTIONAL_TIERS];

/// Glyph substitutions keyed by gradient direction and intensity tier.
///
/// Rows follow [`Direction::table_index`]. Glyphs trace the contour, which
/// runs perpendicular to the gradient: a horizontal gradient draws a
/// vertical stroke. `None` entries fall back to the plain ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionalVariant {
    table: [TierRow; 4],
}

impl DirectionalVariant {
    pub const fn new(table: [TierRow; 4]) -> Self {
        Self { table }
    }

    /// Substitute glyph for `(direction, tier)`, if defined.
    pub fn glyph(&self, direction: Direction, tier: usize) -> Option<char> {
        let row = direction.table_index()?;
        self.table[row].get(tier).copied().flatten()
    }

    fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.table.iter().flat_map(|row| row.iter().flatten().copied())
    }
}

const MANGA_DIRECTIONAL: DirectionalVariant = DirectionalVariant::new([
    // horizontal gradient: vertical strokes
    [Some(']'), Some(')'), Some('!'), None],
    // vertical gradient: horizontal strokes
    [Some('='), Some('-'), Some('_'), None],
    [Some('/'), Some('/'), Some('/'), None],
    [Some('\\'), Some('\\'), Some('\\'), None],
]);

const DIAGONAL_DIRECTIONAL: DirectionalVariant = DirectionalVariant::new([
    [Some('│'), Some('│'), Some('|'), None],
    [Some('▀'), Some('─'), Some('─'), None],
    [Some('/'), Some('/'), Some('/'), None],
    [Some('\\'), Some('\\'), Some('\\'), None],
]);

/// An ordered, non-empty glyph ramp with an optional directional table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRamp {
    glyphs: Vec<char>,
    directional: Option<DirectionalVariant>,
}

impl CharacterRamp {
    /// Build a plain ramp. Empty input is rejected.
    pub fn new(glyphs: &str) -> Result<Self, ConfigError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(ConfigError::EmptyRamp);
        }
        Ok(Self {
            glyphs,
            directional: None,
        })
    }

    /// Attach a directional table. Every glyph in it must belong to the ramp.
    pub fn with_directional(mut self, variant: DirectionalVariant) -> Result<Self, ConfigError> {
        if let Some(stray) = variant.glyphs().find(|g| !self.glyphs.contains(g)) {
            return Err(ConfigError::DirectionalGlyphNotInRamp(stray));
        }
        self.directional = Some(variant);
        Ok(self)
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `idx`, clamped to the last entry.
    pub fn glyph(&self, idx: usize) -> char {
        self.glyphs[idx.min(self.glyphs.len() - 1)]
    }

    /// Position of `glyph` in the ramp.
    pub fn index_of(&self, glyph: char) -> Option<usize> {
        self.glyphs.iter().position(|&g| g == glyph)
    }

    pub fn contains(&self, glyph: char) -> bool {
        self.glyphs.contains(&glyph)
    }

    pub fn directional(&self) -> Option<&DirectionalVariant> {
        self.directional.as_ref()
    }
}

impl fmt::Display for CharacterRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for g in &self.glyphs {
            write!(f, "{}", g)?;
        }
        Ok(())
    }
}

/// Built-in ramp selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum CharSet {
    #[default]
    Standard,
    Bright,
    Detailed,
    Simple,
    Blocks,
    Minimal,
    /// Line-art ramp with a directional table
    Manga,
    /// Box-drawing ramp with a directional table
    Diagonal,
}

impl CharSet {
    pub const ALL: [CharSet; 8] = [
        CharSet::Standard,
        CharSet::Bright,
        CharSet::Detailed,
        CharSet::Simple,
        CharSet::Blocks,
        CharSet::Minimal,
        CharSet::Manga,
        CharSet::Diagonal,
    ];

    /// The raw glyph sequence.
    pub fn chars(&self) -> &'static str {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Bright => BRIGHT_CHARSET,
            CharSet::Detailed => DETAILED_CHARSET,
            CharSet::Simple => SIMPLE_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
            CharSet::Manga => MANGA_CHARSET,
            CharSet::Diagonal => DIAGONAL_CHARSET,
        }
    }

    /// Directional table for ramps that define one.
    pub fn directional(&self) -> Option<DirectionalVariant> {
        match self {
            CharSet::Manga => Some(MANGA_DIRECTIONAL),
            CharSet::Diagonal => Some(DIAGONAL_DIRECTIONAL),
            _ => None,
        }
    }

    /// Build the ramp, including its directional table.
    pub fn ramp(&self) -> Result<CharacterRamp, ConfigError> {
        let ramp = CharacterRamp::new(self.chars())?;
        match self.directional() {
            Some(variant) => ramp.with_directional(variant),
            None => Ok(ramp),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Bright => "bright",
            CharSet::Detailed => "detailed",
            CharSet::Simple => "simple",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
            CharSet::Manga => "manga",
            CharSet::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CharSet::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownCharset(s.to_string()))
    }
}

impl TryFrom<String> for CharSet {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_ramps_build() {
        for set in CharSet::ALL {
            let ramp = set.ramp().unwrap();
            assert!(!ramp.is_empty(), "{} is empty", set);
            assert_eq!(ramp.directional().is_some(), set.directional().is_some());
        }
    }

    #[test]
    fn test_empty_ramp_rejected() {
        assert!(matches!(CharacterRamp::new(""), Err(ConfigError::EmptyRamp)));
    }

    #[test]
    fn test_directional_glyph_must_be_in_ramp() {
        let variant = DirectionalVariant::new([
            [Some('|'), None, None, None],
            [None; 4],
            [None; 4],
            [None; 4],
        ]);
        let err = CharacterRamp::new("@#. ").unwrap().with_directional(variant);
        assert!(matches!(err, Err(ConfigError::DirectionalGlyphNotInRamp('|'))));
    }

    #[test]
    fn test_charset_names_round_trip() {
        for set in CharSet::ALL {
            assert_eq!(set.name().parse::<CharSet>().unwrap(), set);
        }
        assert!("braille".parse::<CharSet>().is_err());
    }

    #[test]
    fn test_directional_lookup() {
        let ramp = CharSet::Diagonal.ramp().unwrap();
        let table = ramp.directional().unwrap();
        assert_eq!(table.glyph(Direction::DiagForward, 0), Some('/'));
        assert_eq!(table.glyph(Direction::Horizontal, 3), None);
        assert_eq!(table.glyph(Direction::None, 0), None);
    }
}
