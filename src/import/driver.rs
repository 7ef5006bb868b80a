//! Import entry points.

use crate::foundation::error::{MeshError, MeshResult};
use crate::host::Host;
use crate::mesh::model::HostDefaults;
use crate::mesh::normalize::normalize_str;
use crate::synth::layer::synthesize;
use anyhow::Context as _;
use serde::Serialize;
use std::path::Path;

/// Label of the undo step wrapping an import.
pub const UNDO_GROUP_NAME: &str = "mesh2shape";

/// What an import authored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportSummary {
    /// Name of the created shape layer.
    pub layer_name: String,
    /// Number of keyframes per property.
    pub keyframe_count: usize,
    /// Number of polygon slots (path groups).
    pub polygon_count: usize,
    /// Composition time covered by the animation, in seconds.
    pub duration: f64,
}

/// Validate mesh JSON text and author it into the host's active composition.
///
/// Validation completes before the first host mutation, so a rejected mesh leaves the host
/// untouched. Synthesis runs inside one undo group that is closed even when synthesis fails.
#[tracing::instrument(skip(text, host), fields(bytes = text.len()))]
pub fn import_mesh<H: Host + ?Sized>(text: &str, host: &mut H) -> MeshResult<ImportSummary> {
    let comp = host
        .composition()
        .ok_or_else(|| MeshError::precondition("no active composition"))?;

    let mesh = normalize_str(
        text,
        HostDefaults {
            min_frame_duration: comp.frame_duration,
        },
    )?;

    host.begin_undo_group(UNDO_GROUP_NAME)?;
    let synthesized = synthesize(&mesh, &mut *host);
    let closed = host.end_undo_group();
    synthesized?;
    closed?;

    let summary = ImportSummary {
        layer_name: mesh.name().to_owned(),
        keyframe_count: mesh.keyframe_count(),
        polygon_count: mesh.polygon_count(),
        duration: mesh.duration(),
    };
    tracing::info!(
        layer = %summary.layer_name,
        keyframes = summary.keyframe_count,
        polygons = summary.polygon_count,
        "mesh imported"
    );
    Ok(summary)
}

/// Read a mesh JSON file and import it. See [`import_mesh`].
pub fn import_mesh_path<H: Host + ?Sized>(
    path: impl AsRef<Path>,
    host: &mut H,
) -> MeshResult<ImportSummary> {
    let text = read_mesh_text(path.as_ref())?;
    import_mesh(&text, host)
}

/// Read mesh JSON text from disk.
pub fn read_mesh_text(path: &Path) -> MeshResult<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read mesh JSON '{}'", path.display()))?;
    Ok(text)
}

#[cfg(test)]
#[path = "../../tests/unit/import/driver.rs"]
mod tests;
