//! Drawing Surface Module
//! The raster-drawing contract every chart renders through, plus the shared color type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A point in surface pixel coordinates (x grows right, y grows down).
pub type Point = (f64, f64);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color: {0:?}")]
pub struct ColorParseError(pub String);

/// RGBA color, written in config and JSON as a CSS-like string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Title and axis label text
    pub const TEXT: Color = Color::rgb(0x33, 0x33, 0x33);
    /// Horizontal grid lines
    pub const GRID: Color = Color::rgb(0xee, 0xee, 0xee);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_functional(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();

        match (parts.as_slice(), with_alpha) {
            ([r, g, b], false) => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            ([r, g, b, a], true) => {
                let alpha: f64 = a.parse().ok()?;
                if !(0.0..=1.0).contains(&alpha) {
                    return None;
                }
                Some(Self::rgba(
                    channel(r)?,
                    channel(g)?,
                    channel(b)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(body) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(body, true)
        } else if let Some(body) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(body, false)
        } else {
            None
        };

        parsed.ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Font size and color for text drawn onto a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self { size, color }
    }
}

/// A fixed-size 2-D raster target.
///
/// Coordinates are pixels with the origin at the top-left corner. Text is
/// positioned by its baseline start; rotated text runs bottom-to-top
/// (rotated -90 degrees) starting at the given point.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reset a rectangle to the surface background.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Stroke an open polyline. Fewer than two points draws nothing.
    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64);

    /// Fill the closed polygon through `points`.
    fn fill_path(&mut self, points: &[Point], color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);

    fn fill_text_rotated(&mut self, text: &str, x: f64, y: f64, style: TextStyle);

    /// Clear the whole surface.
    fn clear(&mut self) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.clear_rect(0.0, 0.0, w, h);
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        (**self).clear_rect(x, y, w, h)
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        (**self).stroke_path(points, color, line_width)
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        (**self).fill_path(points, color)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        (**self).fill_rect(x, y, w, h, color)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        (**self).fill_text(text, x, y, style)
    }

    fn fill_text_rotated(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        (**self).fill_text_rotated(text, x, y, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#3498db".parse::<Color>(), Ok(Color::rgb(0x34, 0x98, 0xdb)));
        assert_eq!("#eee".parse::<Color>(), Ok(Color::rgb(0xee, 0xee, 0xee)));
        assert_eq!(
            "#2980b980".parse::<Color>(),
            Ok(Color::rgba(0x29, 0x80, 0xb9, 0x80))
        );
    }

    #[test]
    fn test_parse_functional_colors() {
        assert_eq!("rgb(46, 204, 113)".parse::<Color>(), Ok(Color::rgb(46, 204, 113)));
        assert_eq!(
            "rgba(52,152,219,0.3)".parse::<Color>(),
            Ok(Color::rgba(52, 152, 219, 77))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("blue".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("rgba(1,2,3,1.5)".parse::<Color>().is_err());
        assert!("rgb(300,0,0)".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for color in [Color::TEXT, Color::rgba(52, 152, 219, 77), Color::TRANSPARENT] {
            assert_eq!(color.to_string().parse::<Color>(), Ok(color));
        }
    }

    #[test]
    fn test_color_deserializes_from_json_string() {
        let color: Color = serde_json::from_str("\"#2ecc71\"").unwrap();
        assert_eq!(color, Color::rgb(0x2e, 0xcc, 0x71));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
