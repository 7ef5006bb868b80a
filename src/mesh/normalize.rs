//! Mesh document validation and normalization.

use crate::foundation::core::{Point, Rgb};
use crate::foundation::error::{MeshError, MeshResult};
use crate::mesh::model::{
    DEFAULT_KEYFRAME_DURATION, DEFAULT_NAME, HostDefaults, Interpolation, Keyframe,
    MAX_KEYFRAME_DURATION, Mesh, Polygon,
};
use crate::schema::coerce::{
    coerce_color, coerce_interpolation, coerce_layer_name, coerce_list, coerce_number,
    coerce_object,
};
use crate::schema::path::SchemaPath;
use serde_json::Value;

/// Members allowed on the top-level mesh object.
pub const MESH_KEYS: &[&str] = &[
    "strokeColor",
    "fillColor",
    "strokeWidth",
    "name",
    "keyframeDuration",
    "timeInterpolation",
    "spatialInterpolation",
    "keyframes",
];
/// Members allowed on a polygon object.
pub const POLYGON_KEYS: &[&str] = &["lambert", "depth", "vertices"];
/// Members allowed on a vertex object.
pub const VERTEX_KEYS: &[&str] = &["x", "y"];

/// Parse mesh JSON text and normalize it. See [`normalize`].
pub fn normalize_str(text: &str, defaults: HostDefaults) -> MeshResult<Mesh> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| MeshError::parse(format!("mesh JSON: {e}")))?;
    normalize(&value, defaults)
}

/// Validate an untrusted mesh document and normalize it into a [`Mesh`].
///
/// Fields are coerced in a fixed order so the first reported violation is stable. Either a
/// fully valid mesh is returned or the first violation is.
#[tracing::instrument(skip(value))]
pub fn normalize(value: &Value, defaults: HostDefaults) -> MeshResult<Mesh> {
    let root = SchemaPath::root();
    let obj = coerce_object(value, MESH_KEYS, &root)?;
    let get = |name: &'static str| (obj.get(name), root.field(name));

    let (v, p) = get("strokeColor");
    let stroke_color = coerce_color(v, Some(Rgb::BLACK), &p)?;
    let (v, p) = get("strokeWidth");
    let stroke_width = coerce_number(v, Some(0.0), 0.0, f64::INFINITY, &p)?;
    let (v, p) = get("fillColor");
    let fill_color = coerce_color(v, Some(Rgb::WHITE), &p)?;
    let (v, p) = get("name");
    let name = coerce_layer_name(v, Some(DEFAULT_NAME), &p)?;
    let (v, p) = get("keyframeDuration");
    let keyframe_duration = coerce_number(
        v,
        Some(DEFAULT_KEYFRAME_DURATION),
        0.0,
        MAX_KEYFRAME_DURATION,
        &p,
    )?
    .max(defaults.min_frame_duration);
    let (v, p) = get("timeInterpolation");
    let time_interpolation = coerce_interpolation(v, Some(Interpolation::ContinuousBezier), &p)?;
    let (v, p) = get("spatialInterpolation");
    let spatial_interpolation =
        coerce_interpolation(v, Some(Interpolation::ContinuousBezier), &p)?;
    let (v, p) = get("keyframes");
    let keyframes = normalize_keyframes(coerce_list(v, &p)?, &p)?;
    check_vertex_counts(&keyframes)?;

    let mesh = Mesh {
        stroke_color,
        fill_color,
        stroke_width,
        name,
        keyframe_duration,
        time_interpolation,
        spatial_interpolation,
        keyframes,
    };
    tracing::debug!(
        keyframes = mesh.keyframe_count(),
        polygons = mesh.polygon_count(),
        keyframe_duration = mesh.keyframe_duration,
        "mesh normalized"
    );
    Ok(mesh)
}

fn normalize_keyframes(list: &[Value], path: &SchemaPath) -> MeshResult<Vec<Keyframe>> {
    let mut polygon_count: Option<usize> = None;
    let mut keyframes = Vec::with_capacity(list.len());
    for (k, raw) in list.iter().enumerate() {
        let kpath = path.index(k);
        let polygons = coerce_list(Some(raw), &kpath)?;
        let expected = *polygon_count.get_or_insert(polygons.len());
        if polygons.len() != expected {
            return Err(MeshError::consistency(format!(
                "{kpath}: polygon count does not match between keyframes \
                 (keyframe 0 has {expected}, keyframe {k} has {})",
                polygons.len()
            )));
        }
        let keyframe = polygons
            .iter()
            .enumerate()
            .map(|(p, raw)| normalize_polygon(raw, &kpath.index(p)))
            .collect::<MeshResult<Keyframe>>()?;
        keyframes.push(keyframe);
    }
    Ok(keyframes)
}

fn normalize_polygon(value: &Value, path: &SchemaPath) -> MeshResult<Polygon> {
    let obj = coerce_object(value, POLYGON_KEYS, path)?;
    let lambert = coerce_number(obj.get("lambert"), None, 0.0, 1.0, &path.field("lambert"))?;
    let depth = coerce_number(
        obj.get("depth"),
        None,
        f64::NEG_INFINITY,
        f64::INFINITY,
        &path.field("depth"),
    )?;
    let vpath = path.field("vertices");
    let vertices = coerce_list(obj.get("vertices"), &vpath)?
        .iter()
        .enumerate()
        .map(|(i, raw)| normalize_vertex(raw, &vpath.index(i)))
        .collect::<MeshResult<Vec<_>>>()?;
    Ok(Polygon {
        lambert,
        depth,
        vertices,
    })
}

fn normalize_vertex(value: &Value, path: &SchemaPath) -> MeshResult<Point> {
    let obj = coerce_object(value, VERTEX_KEYS, path)?;
    let coord = |name: &'static str| {
        coerce_number(
            obj.get(name),
            None,
            f64::NEG_INFINITY,
            f64::INFINITY,
            &path.field(name),
        )
    };
    Ok(Point::new(coord("x")?, coord("y")?))
}

/// Every polygon slot keeps its vertex count across keyframes, since vertices are paired
/// positionally for interpolation. Indexes the normalized keyframes directly.
fn check_vertex_counts(keyframes: &[Keyframe]) -> MeshResult<()> {
    let Some(first) = keyframes.first() else {
        return Ok(());
    };
    for (p, reference) in first.iter().enumerate() {
        let expected = reference.vertices.len();
        for (k, keyframe) in keyframes.iter().enumerate().skip(1) {
            let found = keyframe[p].vertices.len();
            if found != expected {
                return Err(MeshError::consistency(format!(
                    "$.keyframes[{k}][{p}].vertices: vertex count does not match between \
                     keyframes (keyframe 0 has {expected}, keyframe {k} has {found})"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/normalize.rs"]
mod tests;
