//! Host authoring interface.
//!
//! The compositing application is never reached directly; the synthesizer and the import
//! driver talk to it through [`Host`]. [`RecordingHost`] is the in-memory implementation used
//! by the CLI and the tests.

use crate::foundation::core::{BezPath, Canvas, Point, Rgb};
use crate::foundation::error::MeshResult;
use crate::mesh::model::Interpolation;
use serde::Serialize;

pub mod recording;

pub use recording::{Document, HostOp, Key, RecordingHost, ShapeLayer, VectorItem};

/// Handle to a layer created through [`Host::add_shape_layer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LayerId(pub u32);

/// Handle to a property group created on a shape layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyId(pub u32);

/// Snapshot of the active composition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompositionInfo {
    /// Dimensions in pixels.
    pub canvas: Canvas,
    /// Current duration in seconds.
    pub duration: f64,
    /// Length of one frame in seconds.
    pub frame_duration: f64,
}

/// Stroke end cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Flat cap at the endpoint.
    Butt,
    /// Semicircular cap.
    Round,
    /// Square cap extending past the endpoint.
    Projecting,
}

impl LineCap {
    /// Host property code.
    pub fn code(self) -> u8 {
        match self {
            Self::Butt => 1,
            Self::Round => 2,
            Self::Projecting => 3,
        }
    }
}

/// Stroke corner join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    Round,
    /// Cut-off corner.
    Bevel,
}

impl LineJoin {
    /// Host property code.
    pub fn code(self) -> u8 {
        match self {
            Self::Miter => 1,
            Self::Round => 2,
            Self::Bevel => 3,
        }
    }
}

/// Static stroke settings for a stroke graphic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgb,
    /// Width in pixels.
    pub width: f64,
    /// End cap.
    pub cap: LineCap,
    /// Corner join.
    pub join: LineJoin,
}

/// Closed polygonal path in composition pixel space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClosedPath {
    /// Vertices in drawing order; the last one connects back to the first.
    pub vertices: Vec<Point>,
}

impl ClosedPath {
    /// Build a closed path from its vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Straight-segment bezier path. Empty for a path without vertices.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.vertices.iter();
        if let Some(&first) = it.next() {
            path.move_to(first);
            for &p in it {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

/// Authoring calls the compositing application must provide.
///
/// Implementations own their document; callers only hold the returned handles. Every mutation
/// may fail with [`crate::MeshError::Host`] and failures are not retried.
pub trait Host {
    /// Active composition, or `None` when nothing is open.
    fn composition(&self) -> Option<CompositionInfo>;

    /// Open an undo group; every mutation until the matching end is undone as one step.
    fn begin_undo_group(&mut self, name: &str) -> MeshResult<()>;
    /// Close the innermost undo group.
    fn end_undo_group(&mut self) -> MeshResult<()>;

    /// Set the composition duration in seconds.
    fn set_duration(&mut self, secs: f64) -> MeshResult<()>;
    /// Add an empty shape layer on top of the composition.
    fn add_shape_layer(&mut self, name: &str) -> MeshResult<LayerId>;
    /// Set the layer's transform anchor point, in pixels.
    fn set_anchor_point(&mut self, layer: LayerId, anchor: Point) -> MeshResult<()>;

    /// Append a path group to the layer's contents.
    fn add_shape_group(&mut self, layer: LayerId) -> MeshResult<PropertyId>;
    /// Append a stroke graphic to the layer's contents.
    fn add_stroke(&mut self, layer: LayerId, style: StrokeStyle) -> MeshResult<PropertyId>;
    /// Append a fill graphic to the layer's contents.
    fn add_fill(&mut self, layer: LayerId) -> MeshResult<PropertyId>;

    /// Set a path keyframe on a path group.
    fn set_path_at_time(&mut self, group: PropertyId, time: f64, path: ClosedPath)
    -> MeshResult<()>;
    /// Set a color keyframe on a fill graphic.
    fn set_fill_color_at_time(&mut self, fill: PropertyId, time: f64, color: Rgb)
    -> MeshResult<()>;
    /// Set both in and out temporal interpolation of the keyframe at `time`.
    fn set_keyframe_interpolation(
        &mut self,
        property: PropertyId,
        time: f64,
        interpolation: Interpolation,
    ) -> MeshResult<()>;
}
