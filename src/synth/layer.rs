//! Shape layer authoring.

use crate::foundation::error::{MeshError, MeshResult};
use crate::host::{ClosedPath, Host, LineCap, LineJoin, StrokeStyle};
use crate::mesh::model::Mesh;
use crate::synth::transform::{mesh_to_screen, project};

/// Author `mesh` into the host's active composition as one shape layer.
///
/// Per polygon slot the layer gets a path group, a stroke when `stroke_width > 0`, and a
/// fill; every keyframe sets the group's path and the fill's shaded color at
/// `k * keyframe_duration`. Polygons stay in input order. The caller owns the undo group.
///
/// The composition duration is only extended, never shortened. Every authored keyframe gets
/// the mesh's `time_interpolation`; `spatial_interpolation` is not applied because none of
/// the authored properties is spatial.
#[tracing::instrument(skip(mesh, host), fields(name = mesh.name()))]
pub fn synthesize<H: Host + ?Sized>(mesh: &Mesh, host: &mut H) -> MeshResult<()> {
    let comp = host
        .composition()
        .ok_or_else(|| MeshError::precondition("no active composition"))?;

    if mesh.duration() > comp.duration {
        host.set_duration(mesh.duration())?;
    }

    let layer = host.add_shape_layer(mesh.name())?;
    host.set_anchor_point(layer, comp.canvas.center())?;

    let to_screen = mesh_to_screen(comp.canvas);
    let interpolation = mesh.time_interpolation();
    for p in 0..mesh.polygon_count() {
        let group = host.add_shape_group(layer)?;
        if mesh.stroke_width() > 0.0 {
            host.add_stroke(
                layer,
                StrokeStyle {
                    color: mesh.stroke_color(),
                    width: mesh.stroke_width(),
                    cap: LineCap::Round,
                    join: LineJoin::Round,
                },
            )?;
        }
        let fill = host.add_fill(layer)?;

        for (k, keyframe) in mesh.keyframes().iter().enumerate() {
            let polygon = &keyframe[p];
            let time = mesh.keyframe_time(k);
            let path = ClosedPath::new(project(&polygon.vertices, to_screen));
            host.set_path_at_time(group, time, path)?;
            host.set_keyframe_interpolation(group, time, interpolation)?;
            host.set_fill_color_at_time(fill, time, polygon.shaded(mesh.fill_color()))?;
            host.set_keyframe_interpolation(fill, time, interpolation)?;
        }
    }

    tracing::debug!(
        polygons = mesh.polygon_count(),
        keyframes = mesh.keyframe_count(),
        "shape layer synthesized"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/synth/layer.rs"]
mod tests;
