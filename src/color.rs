use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// RGB color stored as three 8-bit channels
///
/// Parses from `RRGGBB` hex in any case, with or without a `#` prefix.
/// The canonical text form is always uppercase `#RRGGBB`; the wire form
/// drops the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Rejected color string in the structured form
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color `{0}`: expected 6 hex digits with an optional `#` prefix")]
pub struct ColorParseError(String);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB` with an optional `#` prefix, case-insensitive
    ///
    /// Exactly 6 hex digits must remain after the prefix; shorthand and
    /// alpha-carrying forms are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    /// Wire form: uppercase hex digits without the `#` prefix
    pub fn hex6(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or(ColorParseError(s))
    }
}

/// Opacity in the unit interval, clamped on every construction path
///
/// The structured form stores the float itself; the wire format quantizes
/// to tenths (0-10), which is the only lossy step in the codec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Opacity(f32);

impl Opacity {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Wire precision: one decimal place, 0-10; half-ties round to even
    pub fn tenths(self) -> u8 {
        (self.0 * 10.0).round_ties_even() as u8
    }

    pub fn from_tenths(tenths: u8) -> Self {
        Self::new(f32::from(tenths) / 10.0)
    }
}

impl From<f32> for Opacity {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Opacity> for f32 {
    fn from(opacity: Opacity) -> Self {
        opacity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_prefix_and_any_case() {
        let expected = HexColor::rgb(0xA1, 0xB2, 0xC3);
        assert_eq!(HexColor::parse("#a1b2c3"), Some(expected));
        assert_eq!(HexColor::parse("A1B2C3"), Some(expected));
        assert_eq!(HexColor::parse("#A1b2c3"), Some(expected));
    }

    #[test]
    fn test_parse_rejects_wrong_lengths_and_digits() {
        assert_eq!(HexColor::parse(""), None);
        assert_eq!(HexColor::parse("#"), None);
        assert_eq!(HexColor::parse("FF000"), None);
        assert_eq!(HexColor::parse("#FF00001"), None);
        assert_eq!(HexColor::parse("GG0000"), None);
        assert_eq!(HexColor::parse("#FF 000"), None);
    }

    #[test]
    fn test_canonical_form_is_uppercase_with_prefix() {
        let color = HexColor::parse("#ff8800").unwrap();
        assert_eq!(color.to_string(), "#FF8800");
        assert_eq!(color.hex6(), "FF8800");
    }

    #[test]
    fn test_serde_canonicalizes_on_round_trip() {
        let color: HexColor = serde_json::from_str("\"ff0000\"").unwrap();
        assert_eq!(color, HexColor::rgb(0xFF, 0x00, 0x00));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#FF0000\"");
    }

    #[test]
    fn test_serde_rejects_garbage() {
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
        assert!(serde_json::from_str::<HexColor>("\"#12345\"").is_err());
    }

    #[test]
    fn test_opacity_clamps_to_unit_interval() {
        assert_eq!(Opacity::new(1.5).value(), 1.0);
        assert_eq!(Opacity::new(-0.25).value(), 0.0);
        assert_eq!(Opacity::new(0.6).value(), 0.6);
    }

    #[test]
    fn test_opacity_tenths_round_trip() {
        for tenths in 0..=10 {
            assert_eq!(Opacity::from_tenths(tenths).tenths(), tenths);
        }
    }

    #[test]
    fn test_opacity_quantizes_to_one_decimal() {
        assert_eq!(Opacity::new(0.33).tenths(), 3);
        assert_eq!(Opacity::new(0.97).tenths(), 10);
        assert_eq!(Opacity::new(0.0).tenths(), 0);
    }

    #[test]
    fn test_opacity_rounds_half_ties_to_even() {
        assert_eq!(Opacity::new(0.05).tenths(), 0);
        assert_eq!(Opacity::new(0.25).tenths(), 2);
        assert_eq!(Opacity::new(0.45).tenths(), 4);
        assert_eq!(Opacity::new(0.65).tenths(), 6);
        assert_eq!(Opacity::new(0.75).tenths(), 8);
    }

    #[test]
    fn test_opacity_serde_clamps_out_of_range_input() {
        let opacity: Opacity = serde_json::from_str("2.5").unwrap();
        assert_eq!(opacity.value(), 1.0);
    }
}
