use super::*;
use crate::foundation::core::{Canvas, Point, Rgb};
use crate::host::{CompositionInfo, HostOp, RecordingHost, VectorItem};
use crate::mesh::model::{HostDefaults, Interpolation};
use crate::mesh::normalize::normalize;
use serde_json::{Value, json};

fn hd(duration: f64) -> CompositionInfo {
    CompositionInfo {
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        duration,
        frame_duration: 1.0 / 30.0,
    }
}

fn mesh(v: Value) -> Mesh {
    normalize(
        &v,
        HostDefaults {
            min_frame_duration: 1.0 / 30.0,
        },
    )
    .unwrap()
}

fn tri(lambert: f64, dy: f64) -> Value {
    json!({
        "lambert": lambert,
        "depth": 0,
        "vertices": [{"x": -1, "y": -1.0 + dy}, {"x": 1, "y": -1.0 + dy}, {"x": 0, "y": 1.0 + dy}]
    })
}

#[test]
fn single_triangle_authors_group_fill_and_one_keyframe() {
    let m = mesh(json!({"keyframes": [[tri(1.0, 0.0)]]}));
    let mut host = RecordingHost::new(hd(10.0));
    synthesize(&m, &mut host).unwrap();

    let doc = host.document();
    assert_eq!(doc.layers.len(), 1);
    let layer = &doc.layers[0];
    assert_eq!(layer.name, "My mesh");
    assert_eq!(layer.anchor_point, Point::new(960.0, 540.0));
    assert_eq!(layer.contents.len(), 2);

    let VectorItem::Group { path, .. } = &layer.contents[0] else {
        panic!("expected a path group first");
    };
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].time, 0.0);
    assert_eq!(
        path[0].value.vertices,
        vec![
            Point::new(420.0, 1080.0),
            Point::new(1500.0, 1080.0),
            Point::new(960.0, 0.0),
        ]
    );
    assert_eq!(path[0].interpolation, Some(Interpolation::ContinuousBezier));

    let VectorItem::Fill { color, .. } = &layer.contents[1] else {
        panic!("expected a fill second");
    };
    assert_eq!(color.len(), 1);
    assert_eq!(color[0].value, Rgb::WHITE);
}

#[test]
fn stroke_is_only_added_for_positive_width() {
    let m = mesh(json!({
        "strokeWidth": 3,
        "strokeColor": {"r": 1, "g": 0, "b": 0},
        "keyframes": [[tri(1.0, 0.0), tri(1.0, 0.5)]]
    }));
    let mut host = RecordingHost::new(hd(10.0));
    synthesize(&m, &mut host).unwrap();

    let contents = &host.document().layers[0].contents;
    assert_eq!(contents.len(), 6);
    let VectorItem::Stroke { style, .. } = &contents[1] else {
        panic!("expected stroke after the group");
    };
    assert_eq!(style.width, 3.0);
    assert_eq!(style.color, Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(style.cap, LineCap::Round);
    assert_eq!(style.join, LineJoin::Round);
    assert_eq!(style.cap.code(), 2);
    assert_eq!(style.join.code(), 2);

    let strokes = host
        .ops()
        .iter()
        .filter(|op| matches!(op, HostOp::AddStroke { .. }))
        .count();
    assert_eq!(strokes, 2);
}

#[test]
fn keyframes_are_spaced_and_shaded_per_polygon() {
    let m = mesh(json!({
        "fillColor": {"r": 1, "g": 0.5, "b": 0},
        "keyframeDuration": 0.5,
        "timeInterpolation": "linear",
        "keyframes": [[tri(1.0, 0.0)], [tri(0.5, 0.1)], [tri(0.0, 0.2)]]
    }));
    let mut host = RecordingHost::new(hd(10.0));
    synthesize(&m, &mut host).unwrap();

    let contents = &host.document().layers[0].contents;
    let VectorItem::Fill { color, .. } = &contents[1] else {
        panic!("expected a fill");
    };
    let times: Vec<f64> = color.iter().map(|k| k.time).collect();
    assert_eq!(times, vec![0.0, 0.5, 1.0]);
    assert_eq!(color[0].value, Rgb::new(1.0, 0.5, 0.0));
    assert_eq!(color[1].value, Rgb::new(0.5, 0.25, 0.0));
    assert_eq!(color[2].value, Rgb::BLACK);
    assert!(
        color
            .iter()
            .all(|k| k.interpolation == Some(Interpolation::Linear))
    );
}

#[test]
fn duration_is_extended_but_never_shrunk() {
    let frames = json!({"keyframes": [[tri(1.0, 0.0)], [tri(1.0, 0.0)], [tri(1.0, 0.0)]]});

    let mut host = RecordingHost::new(hd(2.0));
    synthesize(&mesh(frames.clone()), &mut host).unwrap();
    assert_eq!(host.composition().unwrap().duration, 3.0);

    let mut host = RecordingHost::new(hd(10.0));
    synthesize(&mesh(frames), &mut host).unwrap();
    assert_eq!(host.composition().unwrap().duration, 10.0);
    assert!(
        !host
            .ops()
            .iter()
            .any(|op| matches!(op, HostOp::SetDuration { .. }))
    );
}

#[test]
fn empty_mesh_leaves_zero_length_composition_alone() {
    let mut host = RecordingHost::new(hd(0.0));
    synthesize(&mesh(json!({"keyframes": []})), &mut host).unwrap();
    assert_eq!(host.composition().unwrap().duration, 0.0);
    assert_eq!(host.document().layers.len(), 1);
}

#[test]
fn empty_mesh_still_creates_an_empty_layer() {
    let mut host = RecordingHost::new(hd(10.0));
    synthesize(&mesh(json!({"keyframes": []})), &mut host).unwrap();
    assert_eq!(host.document().layers.len(), 1);
    assert!(host.document().layers[0].contents.is_empty());
}

#[test]
fn missing_composition_is_a_precondition_error() {
    let mut host = RecordingHost::without_composition();
    let err = synthesize(&mesh(json!({"keyframes": []})), &mut host).unwrap_err();
    assert!(matches!(err, MeshError::Precondition(_)));
    assert!(host.ops().is_empty());
}
