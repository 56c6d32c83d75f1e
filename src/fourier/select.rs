use crate::foundation::core::Complex64;
use crate::foundation::error::{EpicycleError, EpicycleResult, Stage};
use crate::fourier::epicycle::{EpicycleFrame, evaluate_chain, evaluate_tip};
use crate::fourier::spectrum::{SpectralComponent, Spectrum};

/// Default component count for [`SelectionPolicy::TopN`].
pub const DEFAULT_COUNT: usize = 50;
/// Default cumulative share for [`SelectionPolicy::CumulativeEnergy`].
pub const DEFAULT_THRESHOLD: f64 = 0.91;

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// How many rotating components to keep.
///
/// Both policies rank non-DC components by descending magnitude with ascending bin index as the
/// tie-break, so the kept set is always a prefix of the same deterministic order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Keep the `count` largest components (clamped to `M - 1`).
    TopN {
        /// Number of rotating components.
        #[serde(default = "default_count")]
        count: usize,
    },
    /// Keep components until their cumulative share of total magnitude reaches `threshold`.
    CumulativeEnergy {
        /// Fraction in `(0, 1]`.
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::TopN {
            count: DEFAULT_COUNT,
        }
    }
}

impl SelectionPolicy {
    /// Spectrum-independent checks.
    pub fn validate(&self) -> EpicycleResult<()> {
        match *self {
            Self::TopN { count } => {
                if count == 0 {
                    return Err(EpicycleError::invalid_config(
                        "top_n count must be >= 1, got 0",
                    ));
                }
            }
            Self::CumulativeEnergy { threshold } => {
                if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
                    return Err(EpicycleError::invalid_config(format!(
                        "cumulative_energy threshold must be in (0, 1], got {threshold}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Components kept for rendering plus the fixed base offset.
///
/// The zero-frequency component never appears in `components`; its coefficient is
/// `base_offset`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Selection {
    /// Coefficient of the frequency-0 bin; the chain's fixed origin.
    pub base_offset: Complex64,
    /// Rotating components, largest first.
    pub components: Vec<SpectralComponent>,
}

impl Selection {
    /// Number of rotating components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Return `true` when nothing rotates.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Bin indices in rendering order.
    pub fn indices(&self) -> Vec<usize> {
        self.components.iter().map(|c| c.index).collect()
    }

    /// Epicycle radii in rendering order.
    pub fn radii(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.magnitude()).collect()
    }

    /// Sum of squared magnitudes of the kept components.
    pub fn energy(&self) -> f64 {
        self.components.iter().map(|c| c.energy()).sum()
    }

    /// Full epicycle chain at time `t`.
    pub fn evaluate(&self, t: f64) -> EpicycleFrame {
        evaluate_chain(self.base_offset, &self.components, t)
    }

    /// Traced point at time `t`.
    pub fn tip(&self, t: f64) -> Complex64 {
        evaluate_tip(self.base_offset, &self.components, t)
    }
}

/// Non-DC components ordered by descending magnitude, ascending index on ties.
pub fn rank_by_magnitude(spectrum: &Spectrum) -> Vec<SpectralComponent> {
    let mut ranked: Vec<SpectralComponent> = spectrum
        .components()
        .iter()
        .filter(|c| !c.is_dc())
        .copied()
        .collect();
    ranked.sort_by(|a, b| {
        b.magnitude()
            .total_cmp(&a.magnitude())
            .then(a.index.cmp(&b.index))
    });
    ranked
}

/// Choose the rotating components for rendering.
///
/// For [`SelectionPolicy::TopN`], `count > M` is rejected and `count == M` is clamped to the
/// `M - 1` rotating bins.
#[tracing::instrument(skip(spectrum), fields(len = spectrum.len()))]
pub fn select(spectrum: &Spectrum, policy: SelectionPolicy) -> EpicycleResult<Selection> {
    policy.validate()?;
    let len = spectrum.len();
    let base_offset = spectrum
        .dc()
        .map(|c| c.coefficient)
        .ok_or_else(|| EpicycleError::empty_input(Stage::Selection, "spectrum has no bins"))?;
    if len < 2 {
        return Err(EpicycleError::empty_input(
            Stage::Selection,
            format!("spectrum of length {len} has no rotating component"),
        ));
    }

    let mut ranked = rank_by_magnitude(spectrum);
    let keep = match policy {
        SelectionPolicy::TopN { count } => {
            if count > len {
                return Err(EpicycleError::invalid_config(format!(
                    "{}: top_n count {count} exceeds spectrum length {len}",
                    Stage::Selection
                )));
            }
            if count > ranked.len() {
                tracing::debug!(count, clamped = ranked.len(), "clamping component count");
            }
            count.min(ranked.len())
        }
        SelectionPolicy::CumulativeEnergy { threshold } => cumulative_prefix(&ranked, threshold),
    };
    ranked.truncate(keep);

    tracing::debug!(kept = ranked.len(), "selected components");
    Ok(Selection {
        base_offset,
        components: ranked,
    })
}

/// Shortest prefix whose cumulative magnitude share reaches `threshold`, at least one.
fn cumulative_prefix(ranked: &[SpectralComponent], threshold: f64) -> usize {
    let total: f64 = ranked.iter().map(|c| c.magnitude()).sum();
    if total <= 0.0 {
        return ranked.len().min(1);
    }
    let mut running = 0.0;
    for (i, c) in ranked.iter().enumerate() {
        running += c.magnitude();
        if running / total >= threshold {
            return i + 1;
        }
    }
    ranked.len()
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/select.rs"]
mod tests;
