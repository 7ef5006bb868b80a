//! Validated mesh model.

use crate::foundation::core::{Point, Rgb};
use serde::{Deserialize, Serialize};

/// Layer name used when the mesh does not declare one.
pub const DEFAULT_NAME: &str = "My mesh";
/// Keyframe spacing in seconds used when the mesh does not declare one.
pub const DEFAULT_KEYFRAME_DURATION: f64 = 1.0;
/// Upper bound for `keyframeDuration`, in seconds.
pub const MAX_KEYFRAME_DURATION: f64 = 60.0;

/// Keyframe interpolation type understood by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight segments between keyframes.
    Linear,
    /// Independent in/out bezier handles.
    Bezier,
    /// Bezier with continuous tangents through the keyframe.
    #[default]
    ContinuousBezier,
    /// Host-computed bezier handles.
    AutoBezier,
}

impl Interpolation {
    /// Every interpolation type, in host code order.
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::Bezier,
        Self::ContinuousBezier,
        Self::AutoBezier,
    ];

    /// Numeric code the host uses for this interpolation type.
    pub fn code(self) -> u8 {
        match self {
            Self::Linear => 0,
            Self::Bezier => 1,
            Self::ContinuousBezier => 2,
            Self::AutoBezier => 3,
        }
    }

    /// Name used in mesh JSON.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Bezier => "bezier",
            Self::ContinuousBezier => "continuous_bezier",
            Self::AutoBezier => "auto_bezier",
        }
    }

    /// Parse the exact JSON name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }
}

/// One shaded polygon of a keyframe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    /// Shading intensity in `[0, 1]`, multiplied into the fill color.
    pub lambert: f64,
    /// Depth hint. Polygons are drawn in input order; depth is carried but not used.
    pub depth: f64,
    /// Outline in normalized mesh space (+y up), implicitly closed.
    pub vertices: Vec<Point>,
}

impl Polygon {
    /// Fill color for this polygon under `fill`.
    pub fn shaded(&self, fill: Rgb) -> Rgb {
        fill.scale(self.lambert)
    }
}

/// Mesh state at one keyframe index.
pub type Keyframe = Vec<Polygon>;

/// Defaults derived from the target composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostDefaults {
    /// Smallest time step the composition can represent, in seconds.
    pub min_frame_duration: f64,
}

/// Validated, normalized mesh.
///
/// Only produced by [`crate::normalize`], so every value of this type satisfies:
///
/// - every keyframe has the same polygon count;
/// - the polygon at index `p` has the same vertex count in every keyframe;
/// - every numeric field is inside its declared range.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
    pub(crate) stroke_color: Rgb,
    pub(crate) fill_color: Rgb,
    pub(crate) stroke_width: f64,
    pub(crate) name: String,
    pub(crate) keyframe_duration: f64,
    pub(crate) time_interpolation: Interpolation,
    pub(crate) spatial_interpolation: Interpolation,
    pub(crate) keyframes: Vec<Keyframe>,
}

impl Mesh {
    /// Stroke color shared by every polygon.
    pub fn stroke_color(&self) -> Rgb {
        self.stroke_color
    }

    /// Base fill color, before lambert shading.
    pub fn fill_color(&self) -> Rgb {
        self.fill_color
    }

    /// Stroke width in pixels; `0` disables strokes.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds between consecutive keyframes.
    pub fn keyframe_duration(&self) -> f64 {
        self.keyframe_duration
    }

    /// Temporal interpolation applied to authored keyframes.
    pub fn time_interpolation(&self) -> Interpolation {
        self.time_interpolation
    }

    /// Spatial interpolation as declared by the mesh.
    pub fn spatial_interpolation(&self) -> Interpolation {
        self.spatial_interpolation
    }

    /// Keyframes in time order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Number of keyframes.
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Number of polygons per keyframe (`0` for a mesh without keyframes).
    pub fn polygon_count(&self) -> usize {
        self.keyframes.first().map_or(0, Vec::len)
    }

    /// Time of keyframe `k`, in seconds.
    pub fn keyframe_time(&self, k: usize) -> f64 {
        k as f64 * self.keyframe_duration
    }

    /// Composition time the animation needs: `keyframe_count * keyframe_duration`.
    pub fn duration(&self) -> f64 {
        self.keyframe_time(self.keyframe_count())
    }
}
