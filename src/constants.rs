//! Application-wide constants
//!
//! This module contains the crosshair defaults, validation limits and
//! on-disk locations used throughout the crate, providing a single source
//! of truth for constant values.

use crate::color::HexColor;

/// Built-in crosshair defaults (the minimal red cross)
pub mod defaults {
    use super::HexColor;

    /// Inner-cross gap from the aim point in pixels
    pub const INNER_GAP: u32 = 10;

    /// Inner-cross line length in pixels
    pub const INNER_LENGTH: u32 = 20;

    /// Inner-cross stroke thickness in pixels
    pub const INNER_THICKNESS: u32 = 2;

    /// Inner-cross color (opaque red)
    pub const INNER_COLOR: HexColor = HexColor::rgb(0xFF, 0x00, 0x00);

    /// Inner-cross opacity (fully opaque)
    pub const INNER_OPACITY: f32 = 1.0;

    /// Number of inner-cross lines
    pub const INNER_LINE_COUNT: u32 = 4;

    /// Outer-cross gap from the aim point in pixels
    ///
    /// The outer cross keeps its own geometry defaults; only colors and
    /// opacities fall back to the inner cross.
    pub const OUTER_GAP: u32 = 30;

    /// Outer-cross line length in pixels
    pub const OUTER_LENGTH: u32 = 20;

    /// Outer-cross stroke thickness in pixels
    pub const OUTER_THICKNESS: u32 = 2;

    /// Number of outer-cross lines
    pub const OUTER_LINE_COUNT: u32 = 4;
}

/// Validation limits for crosshair settings
pub mod validation {
    /// Minimum line count for either cross (a one-line crosshair is a dot)
    pub const MIN_LINE_COUNT: u32 = 2;

    /// Maximum opacity on the wire (tenths of the unit interval)
    pub const MAX_OPACITY_TENTHS: u8 = 10;
}

/// Default-config persistence locations
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "reticle";

    /// Saved default-crosshair filename
    pub const DEFAULT_FILENAME: &str = "default_crosshair.json";
}

/// Canvas defaults for the CLI renderer
pub mod canvas {
    /// Default canvas width in pixels
    pub const DEFAULT_WIDTH: u32 = 300;

    /// Default canvas height in pixels
    pub const DEFAULT_HEIGHT: u32 = 300;
}
