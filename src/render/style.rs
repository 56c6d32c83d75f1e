use crate::foundation::core::Canvas;
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Visual parameters for rasterized epicycle frames.
///
/// Colors are straight-alpha RGBA8.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStyle {
    /// Output frame size.
    pub canvas: Canvas,
    /// Frame background.
    pub background: [u8; 4],
    /// Epicycle circle outlines.
    pub circle_rgba: [u8; 4],
    /// Rotating vectors.
    pub vector_rgba: [u8; 4],
    /// Traced path.
    pub trace_rgba: [u8; 4],
    /// Stroke width for circles and vectors, in pixels.
    pub stroke_width: f64,
    /// Stroke width for the traced path, in pixels.
    pub trace_width: f64,
    /// Fraction of the shorter canvas side kept free on each border.
    pub margin: f64,
    /// Draw epicycle circles.
    pub draw_circles: bool,
    /// Draw the rotating vectors.
    pub draw_vectors: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 480,
                height: 480,
            },
            background: [18, 20, 28, 255],
            circle_rgba: [120, 130, 160, 110],
            vector_rgba: [230, 230, 240, 255],
            trace_rgba: [255, 196, 64, 255],
            stroke_width: 1.0,
            trace_width: 2.0,
            margin: 0.1,
            draw_circles: true,
            draw_vectors: true,
        }
    }
}

impl RenderStyle {
    /// Check canvas bounds, stroke widths and margin.
    pub fn validate(&self) -> EpicycleResult<()> {
        self.canvas.validate()?;
        for (name, w) in [
            ("stroke_width", self.stroke_width),
            ("trace_width", self.trace_width),
        ] {
            if !w.is_finite() || w <= 0.0 {
                return Err(EpicycleError::invalid_config(format!(
                    "style {name} must be finite and > 0, got {w}"
                )));
            }
        }
        if !self.margin.is_finite() || !(0.0..0.5).contains(&self.margin) {
            return Err(EpicycleError::invalid_config(format!(
                "style margin must be in [0, 0.5), got {}",
                self.margin
            )));
        }
        Ok(())
    }
}
