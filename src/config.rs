use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::color::{HexColor, Opacity};
use crate::constants::{defaults, validation};

/// Stroke cap applied by renderers to every crosshair line
///
/// Stored as a raw integer (0/1/2) in the structured form and on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CapStyle {
    #[default]
    Flat,
    Square,
    Round,
}

/// Rejected cap-style integer in the structured form
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid cap style `{0}`: expected 0 (flat), 1 (square) or 2 (round)")]
pub struct CapStyleError(u8);

impl From<CapStyle> for u8 {
    fn from(style: CapStyle) -> Self {
        match style {
            CapStyle::Flat => 0,
            CapStyle::Square => 1,
            CapStyle::Round => 2,
        }
    }
}

impl TryFrom<u8> for CapStyle {
    type Error = CapStyleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CapStyle::Flat),
            1 => Ok(CapStyle::Square),
            2 => Ok(CapStyle::Round),
            other => Err(CapStyleError(other)),
        }
    }
}

/// Raw crosshair settings as they arrive from the structured form
///
/// Every key is optional on input: missing keys take the documented
/// defaults, and the seven derived appearance fields stay `None` until
/// [`resolve`](Self::resolve) falls them back to their inner-cross
/// counterparts. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrosshairParams {
    #[serde(default = "default_inner_gap")]
    pub inner_gap: u32,
    #[serde(default = "default_inner_length")]
    pub inner_length: u32,
    #[serde(default = "default_inner_thickness")]
    pub inner_thickness: u32,
    #[serde(default = "default_inner_color")]
    pub inner_color: HexColor,
    #[serde(default = "default_inner_opacity")]
    pub inner_opacity: Opacity,
    #[serde(default = "default_inner_line_count")]
    pub inner_line_count: u32,

    #[serde(default)]
    pub center_enabled: bool,
    #[serde(default)]
    pub center_color: Option<HexColor>,
    #[serde(default)]
    pub center_thickness: Option<u32>,

    #[serde(default)]
    pub outer_frame_enabled: bool,
    #[serde(default)]
    pub outer_frame_color: Option<HexColor>,
    #[serde(default)]
    pub outer_frame_opacity: Option<Opacity>,
    #[serde(default)]
    pub outer_frame_thickness: Option<u32>,

    #[serde(default)]
    pub outer_cross_enabled: bool,
    #[serde(default = "default_outer_gap")]
    pub outer_gap: u32,
    #[serde(default = "default_outer_length")]
    pub outer_length: u32,
    #[serde(default = "default_outer_thickness")]
    pub outer_thickness: u32,
    #[serde(default)]
    pub outer_cross_color: Option<HexColor>,
    #[serde(default)]
    pub outer_cross_opacity: Option<Opacity>,
    #[serde(default = "default_outer_line_count")]
    pub outer_line_count: u32,

    #[serde(default)]
    pub advanced_enabled: bool,
    #[serde(default)]
    pub inner_angle_offset: u32,
    #[serde(default)]
    pub offset_x: i32,
    #[serde(default)]
    pub offset_y: i32,
    #[serde(default)]
    pub overall_angle_offset: i32,
    #[serde(default)]
    pub advanced_cap_style: CapStyle,
}

fn default_inner_gap() -> u32 {
    defaults::INNER_GAP
}

fn default_inner_length() -> u32 {
    defaults::INNER_LENGTH
}

fn default_inner_thickness() -> u32 {
    defaults::INNER_THICKNESS
}

fn default_inner_color() -> HexColor {
    defaults::INNER_COLOR
}

fn default_inner_opacity() -> Opacity {
    Opacity::new(defaults::INNER_OPACITY)
}

fn default_inner_line_count() -> u32 {
    defaults::INNER_LINE_COUNT
}

fn default_outer_gap() -> u32 {
    defaults::OUTER_GAP
}

fn default_outer_length() -> u32 {
    defaults::OUTER_LENGTH
}

fn default_outer_thickness() -> u32 {
    defaults::OUTER_THICKNESS
}

fn default_outer_line_count() -> u32 {
    defaults::OUTER_LINE_COUNT
}

impl Default for CrosshairParams {
    fn default() -> Self {
        Self {
            inner_gap: default_inner_gap(),
            inner_length: default_inner_length(),
            inner_thickness: default_inner_thickness(),
            inner_color: default_inner_color(),
            inner_opacity: default_inner_opacity(),
            inner_line_count: default_inner_line_count(),
            center_enabled: false,
            center_color: None,
            center_thickness: None,
            outer_frame_enabled: false,
            outer_frame_color: None,
            outer_frame_opacity: None,
            outer_frame_thickness: None,
            outer_cross_enabled: false,
            outer_gap: default_outer_gap(),
            outer_length: default_outer_length(),
            outer_thickness: default_outer_thickness(),
            outer_cross_color: None,
            outer_cross_opacity: None,
            outer_line_count: default_outer_line_count(),
            advanced_enabled: false,
            inner_angle_offset: 0,
            offset_x: 0,
            offset_y: 0,
            overall_angle_offset: 0,
            advanced_cap_style: CapStyle::Flat,
        }
    }
}

impl CrosshairParams {
    /// Resolve every fallback once, producing the concrete config
    ///
    /// Omitted center/frame/outer appearance values inherit from the inner
    /// cross; outer-cross geometry keeps its own literal defaults. Line
    /// counts are clamped to the minimum, and when the advanced block is
    /// disabled its five fields are forced to zero so downstream consumers
    /// can apply offsets unconditionally.
    pub fn resolve(self) -> CrosshairConfig {
        let inner_line_count = clamp_line_count("inner_line_count", self.inner_line_count);
        let outer_line_count = clamp_line_count("outer_line_count", self.outer_line_count);

        let (inner_angle_offset, offset_x, offset_y, overall_angle_offset, advanced_cap_style) =
            if self.advanced_enabled {
                (
                    self.inner_angle_offset,
                    self.offset_x,
                    self.offset_y,
                    self.overall_angle_offset,
                    self.advanced_cap_style,
                )
            } else {
                (0, 0, 0, 0, CapStyle::Flat)
            };

        CrosshairConfig {
            inner_gap: self.inner_gap,
            inner_length: self.inner_length,
            inner_thickness: self.inner_thickness,
            inner_color: self.inner_color,
            inner_opacity: self.inner_opacity,
            inner_line_count,
            center_enabled: self.center_enabled,
            center_color: self.center_color.unwrap_or(self.inner_color),
            center_thickness: self.center_thickness.unwrap_or(self.inner_thickness),
            outer_frame_enabled: self.outer_frame_enabled,
            outer_frame_color: self.outer_frame_color.unwrap_or(self.inner_color),
            outer_frame_opacity: self.outer_frame_opacity.unwrap_or(self.inner_opacity),
            outer_frame_thickness: self.outer_frame_thickness.unwrap_or(self.inner_thickness),
            outer_cross_enabled: self.outer_cross_enabled,
            outer_gap: self.outer_gap,
            outer_length: self.outer_length,
            outer_thickness: self.outer_thickness,
            outer_cross_color: self.outer_cross_color.unwrap_or(self.inner_color),
            outer_cross_opacity: self.outer_cross_opacity.unwrap_or(self.inner_opacity),
            outer_line_count,
            advanced_enabled: self.advanced_enabled,
            inner_angle_offset,
            offset_x,
            offset_y,
            overall_angle_offset,
            advanced_cap_style,
        }
    }
}

fn clamp_line_count(field: &'static str, count: u32) -> u32 {
    if count < validation::MIN_LINE_COUNT {
        warn!(field = field, count = count, min = validation::MIN_LINE_COUNT, "line count below minimum, clamping");
        validation::MIN_LINE_COUNT
    } else {
        count
    }
}

/// Fully resolved crosshair: all 26 settings concrete, no fallbacks left
///
/// Field names double as the keys of the structured form. Obtain one via
/// [`CrosshairParams::resolve`], [`from_structured`](Self::from_structured)
/// or [`decode`](crate::codec::decode); there is deliberately no
/// `Deserialize` impl that could bypass resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosshairConfig {
    pub inner_gap: u32,
    pub inner_length: u32,
    pub inner_thickness: u32,
    pub inner_color: HexColor,
    pub inner_opacity: Opacity,
    pub inner_line_count: u32,
    pub center_enabled: bool,
    pub center_color: HexColor,
    pub center_thickness: u32,
    pub outer_frame_enabled: bool,
    pub outer_frame_color: HexColor,
    pub outer_frame_opacity: Opacity,
    pub outer_frame_thickness: u32,
    pub outer_cross_enabled: bool,
    pub outer_gap: u32,
    pub outer_length: u32,
    pub outer_thickness: u32,
    pub outer_cross_color: HexColor,
    pub outer_cross_opacity: Opacity,
    pub outer_line_count: u32,
    pub advanced_enabled: bool,
    pub inner_angle_offset: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub overall_angle_offset: i32,
    pub advanced_cap_style: CapStyle,
}

impl CrosshairConfig {
    /// Structured (JSON object) form with all 26 keys present
    pub fn to_structured(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Build from the structured form
    ///
    /// Unknown keys are ignored, missing keys default, and omitted derived
    /// keys inherit from the inner cross. Type mismatches and out-of-range
    /// colors/cap styles are errors.
    pub fn from_structured(value: serde_json::Value) -> serde_json::Result<Self> {
        let params: CrosshairParams = serde_json::from_value(value)?;
        Ok(params.resolve())
    }
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        CrosshairParams::default().resolve()
    }
}
