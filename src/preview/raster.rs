//! `vello_cpu` rasterization of one keyframe.

use crate::foundation::core::{BezPath, Canvas, Rgb};
use crate::foundation::error::{MeshError, MeshResult};
use crate::host::ClosedPath;
use crate::mesh::model::Mesh;
use crate::synth::transform::{mesh_to_screen, project};

/// Rendered preview frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels, premultiplied.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Preview settings.
#[derive(Clone, Copy, Debug)]
pub struct PreviewOpts {
    /// Opaque background color.
    pub background: Rgb,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            background: Rgb::new(18.0 / 255.0, 20.0 / 255.0, 28.0 / 255.0),
        }
    }
}

/// Rasterize keyframe `keyframe` of `mesh` as the synthesized layer would show it.
///
/// Uses the same screen mapping and shading as [`crate::synthesize`]; polygons are painted in
/// input order.
#[tracing::instrument(skip(mesh, opts))]
pub fn render_keyframe(
    mesh: &Mesh,
    canvas: Canvas,
    keyframe: usize,
    opts: &PreviewOpts,
) -> MeshResult<FrameRGBA> {
    let polygons = mesh.keyframes().get(keyframe).ok_or_else(|| {
        MeshError::range(format!(
            "keyframe {keyframe} out of range (mesh has {})",
            mesh.keyframe_count()
        ))
    })?;
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| MeshError::range("preview width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| MeshError::range("preview height exceeds u16"))?;

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    let to_screen = mesh_to_screen(canvas);
    let stroke = (mesh.stroke_width() > 0.0).then(|| {
        vello_cpu::kurbo::Stroke::new(mesh.stroke_width())
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round)
    });

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint(color_to_cpu(opts.background));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));
    for polygon in polygons {
        let screen = project(&polygon.vertices, to_screen);
        // Infinite coordinates are valid mesh input but cannot be rasterized.
        if screen.is_empty() || !screen.iter().all(|p| p.is_finite()) {
            continue;
        }
        let path = bezpath_to_cpu(&ClosedPath::new(screen).to_bez_path());
        ctx.set_paint(color_to_cpu(polygon.shaded(mesh.fill_color())));
        ctx.fill_path(&path);
        if let Some(stroke) = &stroke {
            ctx.set_stroke(stroke.clone());
            ctx.set_paint(color_to_cpu(mesh.stroke_color()));
            ctx.stroke_path(&path);
        }
    }
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn color_to_cpu(c: Rgb) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/preview/raster.rs"]
mod tests;
