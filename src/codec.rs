//! Share-code codec
//!
//! A crosshair travels as a single line of `key``value` tokens in fixed
//! order with no separators, e.g. `ig10il20it2icFF0000io10inl4ce0ofr0ocx0adv0`.
//! Disabled feature groups are omitted entirely and decode back through the
//! same fallback resolution as every other construction path, so a decode
//! never produces a partially-filled config.

use thiserror::Error;

use crate::color::{HexColor, Opacity};
use crate::config::{CapStyle, CrosshairConfig, CrosshairParams};
use crate::constants::validation;

/// Decode failure, with the byte offset where scanning stopped
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected `{expected}` at offset {offset}")]
    ExpectedToken { expected: &'static str, offset: usize },

    #[error("expected a number at offset {offset}")]
    ExpectedNumber { offset: usize },

    #[error("expected flag `0` or `1` at offset {offset}")]
    BadFlag { offset: usize },

    #[error("expected 6 hex color digits at offset {offset}")]
    BadColor { offset: usize },

    #[error("value for `{field}` out of range at offset {offset}")]
    OutOfRange { field: &'static str, offset: usize },

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Serialize a resolved crosshair into its share code
///
/// The inverse of [`decode`] up to the omission of disabled groups: their
/// values are dropped from the code and re-derived on the next decode.
pub fn encode(config: &CrosshairConfig) -> String {
    let mut code = format!(
        "ig{}il{}it{}ic{}io{}inl{}ce{}",
        config.inner_gap,
        config.inner_length,
        config.inner_thickness,
        config.inner_color.hex6(),
        config.inner_opacity.tenths(),
        config.inner_line_count,
        u8::from(config.center_enabled),
    );
    if config.center_enabled {
        code.push_str(&format!(
            "cc{}ct{}",
            config.center_color.hex6(),
            config.center_thickness,
        ));
    }
    code.push_str(&format!("ofr{}", u8::from(config.outer_frame_enabled)));
    if config.outer_frame_enabled {
        code.push_str(&format!(
            "ofc{}oo{}oft{}",
            config.outer_frame_color.hex6(),
            config.outer_frame_opacity.tenths(),
            config.outer_frame_thickness,
        ));
    }
    code.push_str(&format!("ocx{}", u8::from(config.outer_cross_enabled)));
    if config.outer_cross_enabled {
        code.push_str(&format!(
            "oxg{}oxl{}oxt{}oxc{}oxo{}olc{}",
            config.outer_gap,
            config.outer_length,
            config.outer_thickness,
            config.outer_cross_color.hex6(),
            config.outer_cross_opacity.tenths(),
            config.outer_line_count,
        ));
    }
    code.push_str(&format!("adv{}", u8::from(config.advanced_enabled)));
    if config.advanced_enabled {
        code.push_str(&format!(
            "ia{}ax{}ay{}oa{}acp{}",
            config.inner_angle_offset,
            config.offset_x,
            config.offset_y,
            config.overall_angle_offset,
            u8::from(config.advanced_cap_style),
        ));
    }
    code
}

/// Parse a share code into a resolved crosshair
///
/// The whole input must match the grammar; nothing may trail the last
/// token. Out-of-range values (opacity over 1.0, line counts below 2,
/// unknown cap styles, numeric overflow) are rejected rather than clamped.
pub fn decode(code: &str) -> Result<CrosshairConfig, FormatError> {
    let mut scanner = Scanner::new(code);
    let mut params = CrosshairParams::default();

    scanner.literal("ig")?;
    params.inner_gap = scanner.uint("ig")?;
    scanner.literal("il")?;
    params.inner_length = scanner.uint("il")?;
    scanner.literal("it")?;
    params.inner_thickness = scanner.uint("it")?;
    scanner.literal("ic")?;
    params.inner_color = scanner.color()?;
    scanner.literal("io")?;
    params.inner_opacity = scanner.opacity("io")?;
    scanner.literal("inl")?;
    params.inner_line_count = scanner.line_count("inl")?;

    scanner.literal("ce")?;
    params.center_enabled = scanner.flag()?;
    if params.center_enabled {
        scanner.literal("cc")?;
        params.center_color = Some(scanner.color()?);
        scanner.literal("ct")?;
        params.center_thickness = Some(scanner.uint("ct")?);
    }

    scanner.literal("ofr")?;
    params.outer_frame_enabled = scanner.flag()?;
    if params.outer_frame_enabled {
        scanner.literal("ofc")?;
        params.outer_frame_color = Some(scanner.color()?);
        scanner.literal("oo")?;
        params.outer_frame_opacity = Some(scanner.opacity("oo")?);
        scanner.literal("oft")?;
        params.outer_frame_thickness = Some(scanner.uint("oft")?);
    }

    scanner.literal("ocx")?;
    params.outer_cross_enabled = scanner.flag()?;
    if params.outer_cross_enabled {
        scanner.literal("oxg")?;
        params.outer_gap = scanner.uint("oxg")?;
        scanner.literal("oxl")?;
        params.outer_length = scanner.uint("oxl")?;
        scanner.literal("oxt")?;
        params.outer_thickness = scanner.uint("oxt")?;
        scanner.literal("oxc")?;
        params.outer_cross_color = Some(scanner.color()?);
        scanner.literal("oxo")?;
        params.outer_cross_opacity = Some(scanner.opacity("oxo")?);
        scanner.literal("olc")?;
        params.outer_line_count = scanner.line_count("olc")?;
    }

    scanner.literal("adv")?;
    params.advanced_enabled = scanner.flag()?;
    if params.advanced_enabled {
        scanner.literal("ia")?;
        params.inner_angle_offset = scanner.uint("ia")?;
        scanner.literal("ax")?;
        params.offset_x = scanner.int("ax")?;
        scanner.literal("ay")?;
        params.offset_y = scanner.int("ay")?;
        scanner.literal("oa")?;
        params.overall_angle_offset = scanner.int("oa")?;
        scanner.literal("acp")?;
        params.advanced_cap_style = scanner.cap_style("acp")?;
    }

    scanner.finish()?;
    Ok(params.resolve())
}

/// Cursor over the raw code bytes
struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input: input.as_bytes(), pos: 0 }
    }

    fn literal(&mut self, expected: &'static str) -> Result<(), FormatError> {
        if self.input[self.pos..].starts_with(expected.as_bytes()) {
            self.pos += expected.len();
            Ok(())
        } else {
            Err(FormatError::ExpectedToken { expected, offset: self.pos })
        }
    }

    /// Greedy run of decimal digits; leading zeros are accepted
    fn uint(&mut self, field: &'static str) -> Result<u32, FormatError> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(digit) = self.input.get(self.pos).filter(|b| b.is_ascii_digit()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(digit - b'0')))
                .ok_or(FormatError::OutOfRange { field, offset: start })?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(FormatError::ExpectedNumber { offset: start });
        }
        Ok(value)
    }

    /// Signed decimal; only the fields the grammar marks signed call this
    fn int(&mut self, field: &'static str) -> Result<i32, FormatError> {
        let start = self.pos;
        let negative = self.input.get(self.pos) == Some(&b'-');
        if negative {
            self.pos += 1;
        }
        let magnitude = i64::from(self.uint(field)?);
        let value = if negative { -magnitude } else { magnitude };
        i32::try_from(value).map_err(|_| FormatError::OutOfRange { field, offset: start })
    }

    fn flag(&mut self) -> Result<bool, FormatError> {
        match self.input.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(FormatError::BadFlag { offset: self.pos }),
        }
    }

    /// Exactly 6 hex digits, no `#` on the wire
    fn color(&mut self) -> Result<HexColor, FormatError> {
        let start = self.pos;
        let color = self
            .input
            .get(start..start + 6)
            .and_then(|window| std::str::from_utf8(window).ok())
            .and_then(HexColor::parse)
            .ok_or(FormatError::BadColor { offset: start })?;
        self.pos = start + 6;
        Ok(color)
    }

    fn opacity(&mut self, field: &'static str) -> Result<Opacity, FormatError> {
        let start = self.pos;
        let tenths = self.uint(field)?;
        if tenths > u32::from(validation::MAX_OPACITY_TENTHS) {
            return Err(FormatError::OutOfRange { field, offset: start });
        }
        Ok(Opacity::from_tenths(tenths as u8))
    }

    fn line_count(&mut self, field: &'static str) -> Result<u32, FormatError> {
        let start = self.pos;
        let count = self.uint(field)?;
        if count < validation::MIN_LINE_COUNT {
            return Err(FormatError::OutOfRange { field, offset: start });
        }
        Ok(count)
    }

    fn cap_style(&mut self, field: &'static str) -> Result<CapStyle, FormatError> {
        let start = self.pos;
        let raw = self.uint(field)?;
        u8::try_from(raw)
            .ok()
            .and_then(|raw| CapStyle::try_from(raw).ok())
            .ok_or(FormatError::OutOfRange { field, offset: start })
    }

    fn finish(&self) -> Result<(), FormatError> {
        if self.pos < self.input.len() {
            Err(FormatError::TrailingInput { offset: self.pos })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "ig10il20it2icFF0000io10inl4ce0ofr0ocx0adv0";

    fn full_config() -> CrosshairConfig {
        CrosshairParams {
            inner_gap: 8,
            inner_length: 25,
            inner_thickness: 3,
            inner_color: HexColor::rgb(0x00, 0xFF, 0x00),
            inner_opacity: Opacity::new(0.8),
            inner_line_count: 6,
            center_enabled: true,
            center_color: Some(HexColor::rgb(0x11, 0x22, 0x33)),
            center_thickness: Some(4),
            outer_frame_enabled: true,
            outer_frame_color: Some(HexColor::rgb(0xAB, 0xCD, 0xEF)),
            outer_frame_opacity: Some(Opacity::new(0.5)),
            outer_frame_thickness: Some(2),
            outer_cross_enabled: true,
            outer_gap: 40,
            outer_length: 15,
            outer_thickness: 2,
            outer_cross_color: Some(HexColor::rgb(0x00, 0x00, 0xFF)),
            outer_cross_opacity: Some(Opacity::new(0.7)),
            outer_line_count: 8,
            advanced_enabled: true,
            inner_angle_offset: 45,
            offset_x: -10,
            offset_y: 5,
            overall_angle_offset: 90,
            advanced_cap_style: CapStyle::Round,
        }
        .resolve()
    }

    const FULL: &str = "ig8il25it3ic00FF00io8inl6ce1cc112233ct4ofr1ofcABCDEFoo5oft2ocx1oxg40oxl15oxt2oxc0000FFoxo7olc8adv1ia45ax-10ay5oa90acp2";

    #[test]
    fn test_encode_default_is_minimal_code() {
        assert_eq!(encode(&CrosshairConfig::default()), MINIMAL);
    }

    #[test]
    fn test_decode_minimal_code_is_default() {
        assert_eq!(decode(MINIMAL).unwrap(), CrosshairConfig::default());
    }

    #[test]
    fn test_encode_full_config() {
        assert_eq!(encode(&full_config()), FULL);
    }

    #[test]
    fn test_decode_full_code() {
        let config = decode(FULL).unwrap();
        assert_eq!(config, full_config());
        assert_eq!(config.inner_gap, 8);
        assert_eq!(config.center_color, HexColor::rgb(0x11, 0x22, 0x33));
        assert_eq!(config.outer_frame_opacity.tenths(), 5);
        assert_eq!(config.offset_x, -10);
        assert_eq!(config.advanced_cap_style, CapStyle::Round);
    }

    #[test]
    fn test_round_trip_with_all_groups_enabled() {
        let config = full_config();
        assert_eq!(decode(&encode(&config)).unwrap(), config);
    }

    #[test]
    fn test_disabled_group_values_are_dropped_from_the_code() {
        // A custom center color survives resolution while disabled, but the
        // code omits the group, so a round trip re-derives it from inner
        let config = CrosshairParams {
            center_enabled: false,
            center_color: Some(HexColor::rgb(0x12, 0x34, 0x56)),
            ..CrosshairParams::default()
        }
        .resolve();

        let restored = decode(&encode(&config)).unwrap();
        assert_eq!(restored.center_color, restored.inner_color);
    }

    #[test]
    fn test_decode_accepts_leading_zeros() {
        let code = "ig010il20it2icFF0000io10inl4ce0ofr0ocx0adv0";
        assert_eq!(decode(code).unwrap().inner_gap, 10);
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert_eq!(
            decode(""),
            Err(FormatError::ExpectedToken { expected: "ig", offset: 0 })
        );
    }

    #[test]
    fn test_decode_rejects_truncated_code() {
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl4ce0ofr0ocx0"),
            Err(FormatError::ExpectedToken { expected: "adv", offset: 38 })
        );
    }

    #[test]
    fn test_decode_rejects_trailing_input() {
        let code = format!("{MINIMAL}x");
        assert_eq!(
            decode(&code),
            Err(FormatError::TrailingInput { offset: MINIMAL.len() })
        );
    }

    #[test]
    fn test_decode_rejects_bad_flag() {
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl4ce2ofr0ocx0adv0"),
            Err(FormatError::BadFlag { offset: 29 })
        );
    }

    #[test]
    fn test_decode_rejects_group_after_cleared_flag() {
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl4ce0cc112233ct4ofr0ocx0adv0"),
            Err(FormatError::ExpectedToken { expected: "ofr", offset: 30 })
        );
    }

    #[test]
    fn test_decode_rejects_set_flag_without_group() {
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl4ce1ofr0ocx0adv0"),
            Err(FormatError::ExpectedToken { expected: "cc", offset: 30 })
        );
    }

    #[test]
    fn test_decode_rejects_opacity_above_one() {
        assert_eq!(
            decode("ig10il20it2icFF0000io11inl4ce0ofr0ocx0adv0"),
            Err(FormatError::OutOfRange { field: "io", offset: 21 })
        );
    }

    #[test]
    fn test_decode_rejects_line_count_below_minimum() {
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl1ce0ofr0ocx0adv0"),
            Err(FormatError::OutOfRange { field: "inl", offset: 26 })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_cap_style() {
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl4ce0ofr0ocx0adv1ia0ax0ay0oa0acp3"),
            Err(FormatError::OutOfRange { field: "acp", offset: 57 })
        );
    }

    #[test]
    fn test_decode_rejects_sign_on_unsigned_field() {
        // `ia` takes no sign; only ax/ay/oa do
        assert_eq!(
            decode("ig10il20it2icFF0000io10inl4ce0ofr0ocx0adv1ia-5ax0ay0oa0acp0"),
            Err(FormatError::ExpectedNumber { offset: 44 })
        );
    }

    #[test]
    fn test_decode_rejects_numeric_overflow() {
        assert_eq!(
            decode("ig99999999999il20it2icFF0000io10inl4ce0ofr0ocx0adv0"),
            Err(FormatError::OutOfRange { field: "ig", offset: 2 })
        );
    }

    #[test]
    fn test_decode_rejects_non_hex_color_digits() {
        assert_eq!(
            decode("ig10il20it2icGG0000io10inl4ce0ofr0ocx0adv0"),
            Err(FormatError::BadColor { offset: 13 })
        );
    }

    #[test]
    fn test_decode_rejects_short_color() {
        // Window reaches into the following `io` token, which is not hex
        assert!(matches!(
            decode("ig10il20it2icFFAAio10inl4ce0ofr0ocx0adv0"),
            Err(FormatError::BadColor { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_eight_digit_color() {
        // Exactly 6 digits are consumed; the surplus pair breaks the next token
        assert_eq!(
            decode("ig10il20it2icFF000011io10inl4ce0ofr0ocx0adv0"),
            Err(FormatError::ExpectedToken { expected: "io", offset: 19 })
        );
    }

    #[test]
    fn test_decode_reports_number_offset() {
        assert_eq!(
            decode("ig10ilXil20"),
            Err(FormatError::ExpectedNumber { offset: 6 })
        );
    }

    #[test]
    fn test_error_messages_carry_offsets() {
        let err = decode("").unwrap_err();
        assert_eq!(err.to_string(), "expected `ig` at offset 0");
    }
}
