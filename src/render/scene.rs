use kurbo::{BezPath, Circle, Line, Point};

use crate::foundation::core::{Canvas, Complex64};
use crate::fourier::epicycle::EpicycleFrame;
use crate::render::style::RenderStyle;

/// Circles smaller than this many pixels are not drawn.
pub const MIN_CIRCLE_RADIUS_PX: f64 = 0.5;

/// Maps normalized complex coordinates onto the canvas.
///
/// The unit square `[-1, 1]²` lands centered on the canvas, inset by `margin` times the
/// shorter side. Pixel `y` grows downward, so the imaginary axis is flipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Pixels per normalized unit.
    pub scale: f64,
    /// Pixel position of the origin.
    pub origin: Point,
}

impl ViewTransform {
    /// Fit the unit square into `canvas`.
    pub fn fit(canvas: Canvas, margin: f64) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let side = w.min(h);
        Self {
            scale: side * (0.5 - margin),
            origin: Point::new(w * 0.5, h * 0.5),
        }
    }

    /// Pixel position of `z`.
    pub fn to_pixel(&self, z: Complex64) -> Point {
        Point::new(
            self.origin.x + z.re * self.scale,
            self.origin.y - z.im * self.scale,
        )
    }

    /// Pixel length of a normalized distance.
    pub fn length(&self, r: f64) -> f64 {
        r * self.scale
    }
}

/// Pixel-space geometry of one frame, ready for a [`crate::render::RenderBackend`].
#[derive(Clone, Debug, Default)]
pub struct FrameScene {
    /// Epicycle circles.
    pub circles: Vec<Circle>,
    /// Rotating vectors, innermost first.
    pub vectors: Vec<Line>,
    /// Polyline through the trace history, oldest first. Empty below two points.
    pub trace: BezPath,
    /// Current traced point.
    pub tip: Option<Point>,
}

impl FrameScene {
    /// Build the scene for `frame` with the trace accumulated so far.
    ///
    /// `trace` is expected to end with the frame's own tip.
    pub fn build(
        frame: &EpicycleFrame,
        trace: &[Complex64],
        view: &ViewTransform,
        style: &RenderStyle,
    ) -> Self {
        let circles = if style.draw_circles {
            frame
                .circles()
                .map(|(c, r)| Circle::new(view.to_pixel(c), view.length(r)))
                .filter(|c| c.radius >= MIN_CIRCLE_RADIUS_PX)
                .collect()
        } else {
            Vec::new()
        };

        let vectors = if style.draw_vectors {
            frame
                .vectors()
                .map(|(a, b)| Line::new(view.to_pixel(a), view.to_pixel(b)))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            circles,
            vectors,
            trace: polyline(trace, view),
            tip: frame.centers.last().map(|&z| view.to_pixel(z)),
        }
    }
}

fn polyline(points: &[Complex64], view: &ViewTransform) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(view.to_pixel(first));
    }
    for &p in it {
        path.line_to(view.to_pixel(p));
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
