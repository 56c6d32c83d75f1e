use kurbo::{BezPath, Circle, Line, Shape as _};

use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::scene::FrameScene;
use crate::render::style::RenderStyle;

/// Flattening tolerance for circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU raster backend powered by `vello_cpu`.
///
/// One backend owns one pixmap and is reused across frames; parallel renders create one
/// backend per worker.
pub struct CpuBackend {
    style: RenderStyle,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    /// Create a backend sized to `style.canvas`.
    pub fn new(style: &RenderStyle) -> EpicycleResult<Self> {
        style.validate()?;
        let width: u16 = style
            .canvas
            .width
            .try_into()
            .map_err(|_| EpicycleError::render("canvas width exceeds u16"))?;
        let height: u16 = style
            .canvas
            .height
            .try_into()
            .map_err(|_| EpicycleError::render("canvas height exceeds u16"))?;
        Ok(Self {
            style: style.clone(),
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Style this backend draws with.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(&mut self, scene: &FrameScene) -> EpicycleResult<FrameRGBA> {
        let style = &self.style;
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);

        ctx.set_paint(color(style.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.stroke_width));
        if !scene.circles.is_empty() {
            ctx.set_paint(color(style.circle_rgba));
            for circle in &scene.circles {
                ctx.stroke_path(&circle_to_cpu(circle));
            }
        }
        if !scene.vectors.is_empty() {
            ctx.set_paint(color(style.vector_rgba));
            for line in &scene.vectors {
                ctx.stroke_path(&line_to_cpu(line));
            }
        }

        ctx.set_paint(color(style.trace_rgba));
        if !scene.trace.is_empty() {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.trace_width));
            ctx.stroke_path(&bezpath_to_cpu(&scene.trace));
        }
        if let Some(tip) = scene.tip {
            let dot = Circle::new(tip, style.trace_width * 1.5);
            ctx.fill_path(&circle_to_cpu(&dot));
        }

        self.pixmap.data_as_u8_slice_mut().fill(0);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn color(rgba: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn circle_to_cpu(circle: &Circle) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&circle.to_path(CIRCLE_TOLERANCE))
}

fn line_to_cpu(line: &Line) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(line.p0));
    out.line_to(point_to_cpu(line.p1));
    out
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
