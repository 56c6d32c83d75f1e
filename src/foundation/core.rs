use crate::foundation::error::{EpicycleError, EpicycleResult};

pub use kurbo::{BezPath, CubicBez, Point};
pub use num_complex::Complex64;

/// Absolute 0-based frame index within an animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> EpicycleResult<Self> {
        if den == 0 {
            return Err(EpicycleError::invalid_config("fps denominator must be > 0"));
        }
        if num == 0 {
            return Err(EpicycleError::invalid_config("fps numerator must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of one frame in whole milliseconds, rounded, never below 1.
    pub fn frame_duration_ms(self) -> u32 {
        let ms = (self.frame_duration_secs() * 1000.0).round();
        (ms as u32).max(1)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject empty canvases and sizes the rasterizer cannot address.
    pub fn validate(self) -> EpicycleResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EpicycleError::invalid_config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(EpicycleError::invalid_config(format!(
                "canvas {}x{} exceeds {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }
}

/// Convert a complex-plane sample into a kurbo point.
pub fn to_point(z: Complex64) -> Point {
    Point::new(z.re, z.im)
}

/// Convert a kurbo point into a complex-plane sample.
pub fn to_complex(p: Point) -> Complex64 {
    Complex64::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
