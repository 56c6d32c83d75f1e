use crate::foundation::core::Complex64;
use crate::fourier::spectrum::SpectralComponent;

/// Epicycle chain geometry at one time value.
///
/// `centers[0]` is the base offset and `centers[i]` is the tip of the `i`-th rotating vector;
/// the last center is the traced point.
#[derive(Clone, Debug, PartialEq)]
pub struct EpicycleFrame {
    /// Time value the chain was evaluated at.
    pub t: f64,
    /// Base offset followed by every partial sum.
    pub centers: Vec<Complex64>,
    /// Epicycle radius for each rotating vector, aligned with `centers[1..]`.
    pub radii: Vec<f64>,
}

impl EpicycleFrame {
    /// Traced point (sum of all vectors plus the base offset).
    pub fn tip(&self) -> Complex64 {
        self.centers.last().copied().unwrap_or_default()
    }

    /// Connecting vectors as `(from, to)` pairs, innermost first.
    pub fn vectors(&self) -> impl Iterator<Item = (Complex64, Complex64)> + '_ {
        self.centers.windows(2).map(|w| (w[0], w[1]))
    }

    /// Epicycle circles as `(center, radius)`; each circle is centered where its vector starts.
    pub fn circles(&self) -> impl Iterator<Item = (Complex64, f64)> + '_ {
        self.centers.iter().copied().zip(self.radii.iter().copied())
    }
}

/// `coefficient · e^{i·frequency·t}`.
pub fn rotating_vector(component: &SpectralComponent, t: f64) -> Complex64 {
    component.coefficient * Complex64::from_polar(1.0, component.frequency as f64 * t)
}

/// Evaluate the full chain at `t`.
///
/// Pure: the result depends only on the arguments. The traced point is order-independent;
/// `components` order only decides nesting.
pub fn evaluate_chain(
    base_offset: Complex64,
    components: &[SpectralComponent],
    t: f64,
) -> EpicycleFrame {
    let mut centers = Vec::with_capacity(components.len() + 1);
    centers.push(base_offset);
    let tip = components.iter().fold(base_offset, |center, c| {
        let next = center + rotating_vector(c, t);
        centers.push(next);
        next
    });
    debug_assert_eq!(centers.last().copied(), Some(tip));
    EpicycleFrame {
        t,
        centers,
        radii: components.iter().map(|c| c.magnitude()).collect(),
    }
}

/// Traced point at `t` without materializing the chain.
pub fn evaluate_tip(base_offset: Complex64, components: &[SpectralComponent], t: f64) -> Complex64 {
    components
        .iter()
        .fold(base_offset, |acc, c| acc + rotating_vector(c, t))
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/epicycle.rs"]
mod tests;
