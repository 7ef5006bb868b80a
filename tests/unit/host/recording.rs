use super::*;
use crate::foundation::core::Canvas;
use crate::host::{LineCap, LineJoin};

fn comp() -> CompositionInfo {
    CompositionInfo {
        canvas: Canvas {
            width: 640,
            height: 360,
        },
        duration: 5.0,
        frame_duration: 1.0 / 25.0,
    }
}

fn tri() -> ClosedPath {
    ClosedPath::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ])
}

#[test]
fn undo_groups_must_balance() {
    let mut host = RecordingHost::new(comp());
    assert!(host.end_undo_group().is_err());
    assert!(host.ops().is_empty());

    host.begin_undo_group("outer").unwrap();
    host.begin_undo_group("inner").unwrap();
    assert_eq!(host.undo_depth(), 2);
    host.end_undo_group().unwrap();
    host.end_undo_group().unwrap();
    assert_eq!(host.undo_depth(), 0);
    assert!(matches!(
        host.end_undo_group().unwrap_err(),
        MeshError::Host(_)
    ));
}

#[test]
fn mutations_without_composition_are_rejected() {
    let mut host = RecordingHost::without_composition();
    assert!(host.composition().is_none());
    assert!(host.add_shape_layer("x").is_err());
    assert!(host.set_duration(3.0).is_err());
    assert!(host.ops().is_empty());
}

#[test]
fn set_duration_updates_composition_and_document() {
    let mut host = RecordingHost::new(comp());
    assert_eq!(host.document().duration, 5.0);
    host.set_duration(12.0).unwrap();
    assert_eq!(host.composition().unwrap().duration, 12.0);
    assert_eq!(host.document().duration, 12.0);
    assert!(host.set_duration(f64::NAN).is_err());
    assert!(host.set_duration(0.0).is_err());
}

#[test]
fn contents_keep_creation_order_and_handles_are_unique() {
    let mut host = RecordingHost::new(comp());
    let layer = host.add_shape_layer("mesh").unwrap();
    host.set_anchor_point(layer, Point::new(320.0, 180.0)).unwrap();
    let g = host.add_shape_group(layer).unwrap();
    let s = host
        .add_stroke(
            layer,
            StrokeStyle {
                color: Rgb::BLACK,
                width: 2.0,
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
        )
        .unwrap();
    let f = host.add_fill(layer).unwrap();
    assert_ne!(g, s);
    assert_ne!(s, f);

    let doc = host.document();
    assert_eq!(doc.layers.len(), 1);
    assert_eq!(doc.layers[0].name, "mesh");
    assert_eq!(doc.layers[0].anchor_point, Point::new(320.0, 180.0));
    let kinds: Vec<&str> = doc.layers[0]
        .contents
        .iter()
        .map(|item| match item {
            VectorItem::Group { .. } => "group",
            VectorItem::Stroke { .. } => "stroke",
            VectorItem::Fill { .. } => "fill",
        })
        .collect();
    assert_eq!(kinds, vec!["group", "stroke", "fill"]);
}

#[test]
fn keys_are_sorted_and_replaced_at_equal_time() {
    let mut host = RecordingHost::new(comp());
    let layer = host.add_shape_layer("mesh").unwrap();
    let f = host.add_fill(layer).unwrap();
    host.set_fill_color_at_time(f, 2.0, Rgb::WHITE).unwrap();
    host.set_fill_color_at_time(f, 0.0, Rgb::BLACK).unwrap();
    host.set_fill_color_at_time(f, 2.0, Rgb::new(0.5, 0.5, 0.5))
        .unwrap();

    let VectorItem::Fill { color, .. } = &host.document().layers[0].contents[0] else {
        panic!("expected a fill");
    };
    let times: Vec<f64> = color.iter().map(|k| k.time).collect();
    assert_eq!(times, vec![0.0, 2.0]);
    assert_eq!(color[1].value, Rgb::new(0.5, 0.5, 0.5));
    assert_eq!(host.ops().len(), 5);
}

#[test]
fn wrong_property_kind_and_unknown_handles_are_rejected() {
    let mut host = RecordingHost::new(comp());
    let layer = host.add_shape_layer("mesh").unwrap();
    let g = host.add_shape_group(layer).unwrap();
    let f = host.add_fill(layer).unwrap();

    assert!(host.set_fill_color_at_time(g, 0.0, Rgb::WHITE).is_err());
    assert!(host.set_path_at_time(f, 0.0, tri()).is_err());
    assert!(host.set_path_at_time(PropertyId(99), 0.0, tri()).is_err());
    assert!(host.add_fill(LayerId(7)).is_err());
    assert!(host.set_path_at_time(g, -1.0, tri()).is_err());
}

#[test]
fn interpolation_requires_an_existing_keyframe() {
    let mut host = RecordingHost::new(comp());
    let layer = host.add_shape_layer("mesh").unwrap();
    let g = host.add_shape_group(layer).unwrap();
    assert!(
        host.set_keyframe_interpolation(g, 1.0, Interpolation::Linear)
            .is_err()
    );

    host.set_path_at_time(g, 1.0, tri()).unwrap();
    host.set_keyframe_interpolation(g, 1.0, Interpolation::Linear)
        .unwrap();
    let VectorItem::Group { path, .. } = &host.document().layers[0].contents[0] else {
        panic!("expected a group");
    };
    assert_eq!(path[0].interpolation, Some(Interpolation::Linear));
}

#[test]
fn ops_serialize_with_snake_case_tags() {
    let mut host = RecordingHost::new(comp());
    host.begin_undo_group("mesh2shape").unwrap();
    host.end_undo_group().unwrap();
    let v = serde_json::to_value(host.ops()).unwrap();
    assert_eq!(v[0]["op"], "begin_undo_group");
    assert_eq!(v[0]["name"], "mesh2shape");
    assert_eq!(v[1]["op"], "end_undo_group");
}

#[test]
fn closed_path_builds_a_closed_bez_path() {
    use kurbo::PathEl;

    let els: Vec<PathEl> = tri().to_bez_path().elements().to_vec();
    assert_eq!(els.len(), 4);
    assert!(matches!(els[0], PathEl::MoveTo(_)));
    assert!(matches!(els[3], PathEl::ClosePath));
    assert!(ClosedPath::new(Vec::new()).to_bez_path().elements().is_empty());
}
