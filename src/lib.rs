//! mesh2shape turns a JSON description of an animated 2D mesh into keyframed vector shape
//! layers in a compositing application.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: `serde_json::Value -> Mesh` ([`normalize`]). A strict, closed-schema
//!    validator that coerces defaults, enforces ranges, and checks that polygon and vertex counts
//!    agree across keyframes.
//! 2. **Synthesize**: `Mesh -> Host calls` ([`synthesize`]). One shape layer, one path group and
//!    fill per polygon slot, and a path plus color keyframe per keyframe.
//! 3. **Import** ([`import_mesh`]): the driver that checks for an active composition, runs both
//!    steps, and wraps synthesis in one undo group.
//!
//! Validation always completes before the first host mutation. The host is only reached
//! through the [`Host`] trait; [`RecordingHost`] keeps the authored document in memory.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod foundation;
pub mod host;
pub mod import;
pub mod mesh;
pub mod preview;
pub mod schema;
pub mod synth;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, Point, Rgb};
pub use crate::foundation::error::{MeshError, MeshResult};

pub use crate::host::{
    ClosedPath, CompositionInfo, Document, Host, HostOp, LayerId, LineCap, LineJoin, PropertyId,
    RecordingHost, StrokeStyle,
};
pub use crate::import::{ImportSummary, import_mesh, import_mesh_path};
pub use crate::mesh::model::{HostDefaults, Interpolation, Keyframe, Mesh, Polygon};
pub use crate::mesh::normalize::{normalize, normalize_str};
pub use crate::preview::{FrameRGBA, PreviewOpts, render_keyframe};
pub use crate::synth::{mesh_to_screen, synthesize};
