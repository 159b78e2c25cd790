//! Color keys.
//!
//! A color key is `#RRGGBB`. Keys identify materials in ship images, so they
//! must be unique across a database; `ColorSet` is the uniqueness ledger a
//! command owns while it derives new keys.

use crate::error::DbError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Upper bound on the uniform bump applied while searching for a free color.
/// Past this every channel has been pushed through its whole range.
pub const MAX_COLOR_SEARCH_STEPS: i32 = 511;

/// Legacy rope endpoints use red 0 and green below this value.
const LEGACY_ROPE_GREEN_LIMIT: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Signed per-channel difference between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbOffset {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (either case).
    pub fn parse_hex(text: &str) -> Result<Self, DbError> {
        let invalid = || DbError::InvalidColor(text.to_string());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Upper-case `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// `other - self`, channel by channel.
    pub fn delta_to(self, other: Rgb) -> RgbOffset {
        RgbOffset {
            r: i32::from(other.r) - i32::from(self.r),
            g: i32::from(other.g) - i32::from(self.g),
            b: i32::from(other.b) - i32::from(self.b),
        }
    }

    /// Apply `offset` plus a uniform `bump` to every channel, clamped to 0..=255.
    pub fn shifted(self, offset: RgbOffset, bump: i32) -> Rgb {
        let channel = |base: u8, delta: i32| (i32::from(base) + delta + bump).clamp(0, 255) as u8;
        Rgb::new(
            channel(self.r, offset.r),
            channel(self.g, offset.g),
            channel(self.b, offset.b),
        )
    }

    /// Whether the color falls in the range reserved for legacy ropes.
    pub fn is_legacy_rope(self) -> bool {
        self.r == 0 && self.g < LEGACY_ROPE_GREEN_LIMIT
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse_hex(s)
    }
}

impl RgbOffset {
    pub const fn uniform(value: i32) -> Self {
        Self {
            r: value,
            g: value,
            b: value,
        }
    }

    /// `self * numerator / denominator` per channel, truncated toward zero.
    pub fn scaled(self, numerator: i32, denominator: i32) -> Self {
        Self {
            r: self.r * numerator / denominator,
            g: self.g * numerator / denominator,
            b: self.b * numerator / denominator,
        }
    }
}

/// The set of color keys already taken in a database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSet {
    colors: BTreeSet<Rgb>,
}

impl ColorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Returns `false` when the color was already taken.
    pub fn insert(&mut self, color: Rgb) -> bool {
        self.colors.insert(color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Find the first free color at `base + offset + k` for k = 0, 1, 2, ...
    /// and take it.
    pub fn claim_derived(&mut self, base: Rgb, offset: RgbOffset) -> Result<Rgb, DbError> {
        for bump in 0..=MAX_COLOR_SEARCH_STEPS {
            let candidate = base.shifted(offset, bump);
            if self.insert(candidate) {
                return Ok(candidate);
            }
        }
        Err(DbError::ColorSpaceExhausted(base.shifted(offset, 0).to_hex()))
    }
}

impl FromIterator<Rgb> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}
