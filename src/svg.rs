//! SVG reference renderer
//!
//! Turns the primitive list into a standalone SVG document. This is where
//! the cap style finally lands: the geometry carries it untouched and every
//! segment here gets the matching `stroke-linecap`.

use std::fmt::Write;

use crate::config::{CapStyle, CrosshairConfig};
use crate::geometry::{render, CanvasSize, Primitive};

fn linecap(style: CapStyle) -> &'static str {
    match style {
        CapStyle::Flat => "butt",
        CapStyle::Square => "square",
        CapStyle::Round => "round",
    }
}

/// Render a crosshair into a standalone SVG document
pub fn document(config: &CrosshairConfig, canvas: CanvasSize) -> String {
    let primitives = render(config, canvas);
    let cap = linecap(config.advanced_cap_style);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        canvas.width, canvas.height, canvas.width, canvas.height
    )
    .unwrap();

    for primitive in &primitives {
        match primitive {
            Primitive::Segment { p1, p2, color, opacity, thickness } => {
                writeln!(
                    svg,
                    r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="{}"/>"#,
                    p1.x, p1.y, p2.x, p2.y, color, opacity.value(), thickness, cap
                )
                .unwrap();
            }
            Primitive::Circle { center, radius, color, opacity } => {
                writeln!(
                    svg,
                    r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                    center.x, center.y, radius, color, opacity.value()
                )
                .unwrap();
            }
        }
    }

    writeln!(svg, "</svg>").unwrap();
    svg
}
