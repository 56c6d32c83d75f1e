use crate::foundation::core::Complex64;
use crate::foundation::error::{EpicycleError, EpicycleResult, Stage};
use crate::fourier::sampler::PointSequence;

/// Arithmetic mean of the points.
pub fn centroid(points: &PointSequence) -> Option<Complex64> {
    if points.is_empty() {
        return None;
    }
    let sum: Complex64 = points.iter().sum();
    Some(sum / points.len() as f64)
}

/// Largest absolute real or imaginary component over all points.
pub fn max_extent(points: &[Complex64]) -> f64 {
    points
        .iter()
        .fold(0.0_f64, |acc, p| acc.max(p.re.abs()).max(p.im.abs()))
}

/// Center on the centroid, rescale to unit maximum extent and flip the vertical axis.
///
/// The source coordinate system has its origin top-left with `y` growing downward; the output
/// uses the math convention (`y` up). Length and order are preserved.
#[tracing::instrument(skip(points), fields(len = points.len()))]
pub fn normalize(points: &PointSequence) -> EpicycleResult<PointSequence> {
    let center = centroid(points).ok_or_else(|| {
        EpicycleError::empty_input(Stage::Normalization, "point sequence has zero points")
    })?;

    let first = points.as_slice()[0];
    if points.iter().all(|&p| p == first) {
        return Err(EpicycleError::degenerate_scale(
            Stage::Normalization,
            format!(
                "all {} points coincide at ({}, {})",
                points.len(),
                first.re,
                first.im
            ),
        ));
    }

    let centered: Vec<Complex64> = points.iter().map(|p| p - center).collect();
    let scale = max_extent(&centered);
    if !scale.is_finite() || scale == 0.0 {
        return Err(EpicycleError::degenerate_scale(
            Stage::Normalization,
            format!("scale = {scale} after centering {} points", points.len()),
        ));
    }

    tracing::debug!(cx = center.re, cy = center.im, scale, "normalizing outline");
    Ok(PointSequence::from_points(
        centered
            .into_iter()
            .map(|p| {
                let q = p / scale;
                Complex64::new(q.re, -q.im)
            })
            .collect(),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/normalize.rs"]
mod tests;
