use kurbo::{CubicBez, ParamCurve, PathSeg};

use crate::foundation::core::{Complex64, to_complex};

/// A parametric curve piece over `u ∈ [0, 1]`.
///
/// The sampler depends on nothing but this capability.
pub trait CurveSegment {
    /// Position at parameter `u`, as a point in the complex plane.
    fn evaluate(&self, u: f64) -> Complex64;
}

impl CurveSegment for CubicBez {
    fn evaluate(&self, u: f64) -> Complex64 {
        to_complex(self.eval(u))
    }
}

impl CurveSegment for PathSeg {
    fn evaluate(&self, u: f64) -> Complex64 {
        to_complex(self.eval(u))
    }
}

impl<S: CurveSegment + ?Sized> CurveSegment for &S {
    fn evaluate(&self, u: f64) -> Complex64 {
        (**self).evaluate(u)
    }
}

impl<S: CurveSegment + ?Sized> CurveSegment for Box<S> {
    fn evaluate(&self, u: f64) -> Complex64 {
        (**self).evaluate(u)
    }
}
