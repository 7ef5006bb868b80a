//! Mesh space to composition pixel mapping.

use crate::foundation::core::{Affine, Canvas, Point};

/// Map normalized mesh space into composition pixels.
///
/// Both axes scale by `height / 2` so the mapping keeps aspect and is anchored on the canvas
/// height: `x = 1` lands `height / 2` pixels right of center, not at the right edge. Mesh +y
/// is up, screen +y is down.
pub fn mesh_to_screen(canvas: Canvas) -> Affine {
    let half_h = f64::from(canvas.height) / 2.0;
    let center = canvas.center();
    Affine::translate((center.x, center.y)) * Affine::scale_non_uniform(half_h, -half_h)
}

/// Apply [`mesh_to_screen`] to every vertex, keeping order.
pub fn project(vertices: &[Point], to_screen: Affine) -> Vec<Point> {
    vertices.iter().map(|&v| to_screen * v).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/synth/transform.rs"]
mod tests;
