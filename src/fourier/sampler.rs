use crate::foundation::core::Complex64;
use crate::foundation::error::{EpicycleError, EpicycleResult, Stage};
use crate::fourier::segment::CurveSegment;

/// Estimated lengths at or below this are treated as degenerate segments.
const DEGENERATE_LENGTH: f64 = 1e-12;
const LENGTH_ROUNDING: f64 = 1e-12;

/// Ordered outline samples in the complex plane.
///
/// Order is traversal order. The sequence is built append-only by [`sample_segments`] and is
/// read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSequence(Vec<Complex64>);

impl PointSequence {
    /// Wrap already-ordered points.
    pub fn from_points(points: Vec<Complex64>) -> Self {
        Self(points)
    }

    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self(Vec::with_capacity(cap))
    }

    pub(crate) fn push(&mut self, p: Complex64) {
        self.0.push(p);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when no points were sampled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the points in order.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.0
    }

    /// Iterate the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Complex64> {
        self.0.iter()
    }

    /// Take ownership of the points.
    pub fn into_vec(self) -> Vec<Complex64> {
        self.0
    }
}

/// Sampling density controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerParams {
    /// Uniform parameter samples used to estimate each segment's length (inclusive of both ends).
    pub base_sample_count: usize,
    /// Target arc-length spacing between retained points. Smaller is denser.
    pub rate: f64,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            base_sample_count: 20,
            rate: 1.0,
        }
    }
}

impl SamplerParams {
    /// Check `base_sample_count >= 2` and `rate` finite and positive.
    pub fn validate(&self) -> EpicycleResult<()> {
        if self.base_sample_count < 2 {
            return Err(EpicycleError::invalid_config(format!(
                "base_sample_count must be >= 2, got {}",
                self.base_sample_count
            )));
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(EpicycleError::invalid_config(format!(
                "rate must be finite and > 0, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}

/// Polyline length of `segment` through `base_sample_count` uniform parameter values in `[0, 1]`.
pub fn estimate_length<S: CurveSegment + ?Sized>(segment: &S, base_sample_count: usize) -> f64 {
    if base_sample_count < 2 {
        return 0.0;
    }
    let last = (base_sample_count - 1) as f64;
    let mut prev = segment.evaluate(0.0);
    let mut length = 0.0;
    for i in 1..base_sample_count {
        let p = segment.evaluate(i as f64 / last);
        length += (p - prev).norm();
        prev = p;
    }
    length
}

/// Number of points to retain for a segment of estimated length `length`.
///
/// `floor(length / rate) + 1`, never below one. Non-finite ratios fall back to one point.
pub fn target_count(length: f64, rate: f64) -> usize {
    // Chord sums of straight segments land a rounding error below exact multiples of `rate`.
    let ratio = (length / rate * (1.0 + LENGTH_ROUNDING)).floor();
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1;
    }
    (ratio as usize).saturating_add(1)
}

/// Sample `segments` into one ordered point sequence.
///
/// Each segment contributes `n = target_count(L, rate)` points at `u = j / n` for `j in 0..n`,
/// so the shared endpoint with the next segment is never duplicated and the path carries no
/// explicit closing point.
#[tracing::instrument(skip(segments), fields(segments = segments.len()))]
pub fn sample_segments<S: CurveSegment>(
    segments: &[S],
    params: SamplerParams,
) -> EpicycleResult<PointSequence> {
    params.validate()?;
    if segments.is_empty() {
        return Err(EpicycleError::empty_input(
            Stage::Sampling,
            "path has zero segments",
        ));
    }

    let mut out = PointSequence::with_capacity(segments.len() * params.base_sample_count);
    for (idx, segment) in segments.iter().enumerate() {
        let length = estimate_length(segment, params.base_sample_count);
        if length <= DEGENERATE_LENGTH {
            tracing::debug!(segment = idx, length, "degenerate segment, keeping one point");
        }
        let n = target_count(length, params.rate);
        for j in 0..n {
            out.push(segment.evaluate(j as f64 / n as f64));
        }
    }

    tracing::debug!(points = out.len(), "sampled outline");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/sampler.rs"]
mod tests;
