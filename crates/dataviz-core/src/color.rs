//! Colors for highlight styles
//!
//! Style files spell colors as hex strings (`#D55E00`, or `#D55E0080`
//! with alpha), so `Color` serializes to and from that form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// A color in RGBA format (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB (alpha = 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from hex string (e.g., "#FF5733", "FF5733" or "#FF573380")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            Some(u8::from_str_radix(&hex[i..i + 2], 16).ok()? as f32 / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };

        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Convert to hex string; alpha is appended only when not opaque
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.a) == 255 {
            format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or(ConfigError::InvalidColor(value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// MARK: - Palette used by the built-in style contract

/// Vermillion accent for markers and bands
pub fn accent() -> Color {
    Color::rgb(213.0 / 255.0, 94.0 / 255.0, 0.0)
}

/// Yellow used for glow halos
pub fn glow_yellow() -> Color {
    Color::rgb(240.0 / 255.0, 228.0 / 255.0, 66.0 / 255.0)
}

/// Dark grey for annotation text and arrows
pub fn annotation_grey() -> Color {
    Color::rgb(51.0 / 255.0, 51.0 / 255.0, 51.0 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let color = Color::from_hex("#D55E00").unwrap();
        assert_eq!(color.to_hex(), "#D55E00");
        assert_eq!(color, accent());
    }

    #[test]
    fn test_hex_with_alpha() {
        let color = Color::from_hex("333333CC").unwrap();
        assert!((color.a - 0.8).abs() < 1e-6);
        assert_eq!(color.to_hex(), "#333333CC");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&glow_yellow()).unwrap();
        assert_eq!(json, "\"#F0E442\"");

        let parsed: Color = serde_json::from_str("\"#333333\"").unwrap();
        assert_eq!(parsed, annotation_grey());

        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
