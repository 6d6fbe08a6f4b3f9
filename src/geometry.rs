//! Deterministic crosshair geometry
//!
//! Flattens a resolved config into an ordered list of draw primitives.
//! The list is painter's order: outer frame first (it strokes the inner
//! geometry from behind), then the inner cross, the center dot, and the
//! outer cross on top.

use serde::{Deserialize, Serialize};

use crate::color::{HexColor, Opacity};
use crate::config::CrosshairConfig;

/// A point on the canvas, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One drawable element of a crosshair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Stroked line segment
    Segment {
        p1: Point,
        p2: Point,
        color: HexColor,
        opacity: Opacity,
        thickness: u32,
    },
    /// Filled dot at the aim point
    Circle {
        center: Point,
        radius: u32,
        color: HexColor,
        opacity: Opacity,
    },
}

/// Flatten a crosshair into draw primitives for the given canvas
///
/// The aim point is the integer canvas center shifted by the configured
/// offsets. The inner cross (and the frame behind it) rotates by the sum
/// of the overall and inner angle offsets; the outer cross rotates by the
/// overall offset alone. Output depends only on the inputs.
pub fn render(config: &CrosshairConfig, canvas: CanvasSize) -> Vec<Primitive> {
    // Half the canvas first, then sum in i64: offsets run the full i32 range
    let center = Point::new(
        (i64::from(canvas.width / 2) + i64::from(config.offset_x)) as f32,
        (i64::from(canvas.height / 2) + i64::from(config.offset_y)) as f32,
    );

    let overall_angle = config.overall_angle_offset as f32;
    let inner_angle = overall_angle + config.inner_angle_offset as f32;

    let mut primitives = Vec::with_capacity(
        config.inner_line_count as usize * 2 + config.outer_line_count as usize + 1,
    );

    if config.outer_frame_enabled {
        push_spokes(
            &mut primitives,
            center,
            inner_angle,
            config.inner_line_count,
            config.inner_gap,
            config.inner_length,
            Stroke {
                color: config.outer_frame_color,
                opacity: config.outer_frame_opacity,
                thickness: config.outer_frame_thickness,
            },
        );
    }

    push_spokes(
        &mut primitives,
        center,
        inner_angle,
        config.inner_line_count,
        config.inner_gap,
        config.inner_length,
        Stroke {
            color: config.inner_color,
            opacity: config.inner_opacity,
            thickness: config.inner_thickness,
        },
    );

    if config.center_enabled {
        primitives.push(Primitive::Circle {
            center,
            radius: config.center_thickness / 2,
            color: config.center_color,
            // The dot borrows the inner-cross opacity; it has none of its own
            opacity: config.inner_opacity,
        });
    }

    if config.outer_cross_enabled {
        push_spokes(
            &mut primitives,
            center,
            overall_angle,
            config.outer_line_count,
            config.outer_gap,
            config.outer_length,
            Stroke {
                color: config.outer_cross_color,
                opacity: config.outer_cross_opacity,
                thickness: config.outer_thickness,
            },
        );
    }

    primitives
}

#[derive(Debug, Clone, Copy)]
struct Stroke {
    color: HexColor,
    opacity: Opacity,
    thickness: u32,
}

/// Evenly spaced radial segments from `gap` to `gap + length`
fn push_spokes(
    out: &mut Vec<Primitive>,
    center: Point,
    start_angle: f32,
    line_count: u32,
    gap: u32,
    length: u32,
    stroke: Stroke,
) {
    let step = 360.0 / line_count as f32;
    // Summed as floats: gap and length each run to u32::MAX
    let near = gap as f32;
    let far = gap as f32 + length as f32;
    for i in 0..line_count {
        let angle = (start_angle + step * i as f32).to_radians();
        let (sin, cos) = angle.sin_cos();
        out.push(Primitive::Segment {
            p1: Point::new(center.x + near * cos, center.y + near * sin),
            p2: Point::new(center.x + far * cos, center.y + far * sin),
            color: stroke.color,
            opacity: stroke.opacity,
            thickness: stroke.thickness,
        });
    }
}
