//! CPU raster preview of a synthesized mesh layer.

pub mod raster;

pub use raster::{FrameRGBA, PreviewOpts, render_keyframe};
