//! Hex to `rgba(...)` conversion for chart strokes and fills.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Input was not a `#RRGGBB` string.
    InvalidColor(String),
    /// Alpha outside `[0, 1]` or not finite.
    InvalidAlpha(f64),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidColor(raw) => {
                write!(f, "Invalid color '{}': expected #RRGGBB", raw)
            }
            ColorError::InvalidAlpha(alpha) => {
                write!(f, "Invalid alpha {}: must be between 0 and 1", alpha)
            }
        }
    }
}

impl std::error::Error for ColorError {}

/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (either case).
    pub fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let caps = HEX_COLOR_REGEX
            .captures(hex.trim())
            .ok_or_else(|| ColorError::InvalidColor(hex.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&caps[i], 16).map_err(|_| ColorError::InvalidColor(hex.to_string()))
        };

        Ok(Rgb {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn with_alpha(self, alpha: f64) -> Result<String, ColorError> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(ColorError::InvalidAlpha(alpha));
        }
        Ok(format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha))
    }
}

/// Convert `#RRGGBB` plus an alpha into `rgba(r,g,b,a)`.
///
/// Malformed hex fails with [`ColorError::InvalidColor`] instead of producing
/// NaN channels.
pub fn to_rgba(hex: &str, alpha: f64) -> Result<String, ColorError> {
    Rgb::parse_hex(hex)?.with_alpha(alpha)
}
