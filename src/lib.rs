#![forbid(unsafe_code)]

//! Crosshair share codes, structured configs and deterministic geometry.
//! The binary is a thin CLI over this library so everything here stays
//! testable without a display.
//!
//! A crosshair exists in three forms: the compact share code
//! (`ig10il20it2icFF0000io10inl4ce0ofr0ocx0adv0`), the structured JSON
//! object keyed by setting names, and the resolved [`CrosshairConfig`]
//! every consumer works with. [`codec`] converts between the code and the
//! config, [`config`] between the structured form and the config, and
//! [`geometry`] flattens a config into draw primitives.

pub mod codec;
pub mod color;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod store;
pub mod svg;

// Re-export the working set so callers rarely need the module paths
pub use codec::{decode, encode, FormatError};
pub use color::{HexColor, Opacity};
pub use config::{CapStyle, CrosshairConfig, CrosshairParams};
pub use geometry::{render, CanvasSize, Point, Primitive};
