use rustfft::FftPlanner;

use crate::foundation::core::Complex64;
use crate::foundation::error::{EpicycleError, EpicycleResult, Stage};
use crate::fourier::sampler::PointSequence;

/// One discrete frequency bin of a point sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SpectralComponent {
    /// Bin index in `0..M`.
    pub index: usize,
    /// Signed cycles per full sequence.
    pub frequency: i64,
    /// Complex amplitude (normalized by `1/M`).
    pub coefficient: Complex64,
}

impl SpectralComponent {
    /// Rotation radius, `|coefficient|`.
    pub fn magnitude(&self) -> f64 {
        self.coefficient.norm()
    }

    /// Squared magnitude; proportional to the component's energy share (Parseval).
    pub fn energy(&self) -> f64 {
        self.coefficient.norm_sqr()
    }

    /// Return `true` for the zero-frequency (mean) component.
    pub fn is_dc(&self) -> bool {
        self.frequency == 0
    }
}

/// Full spectrum of a point sequence: exactly one component per sample.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Spectrum {
    components: Vec<SpectralComponent>,
}

impl Spectrum {
    /// Number of bins (equal to the sequence length).
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Return `true` for the spectrum of an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in bin-index order.
    pub fn components(&self) -> &[SpectralComponent] {
        &self.components
    }

    /// The zero-frequency component.
    pub fn dc(&self) -> Option<&SpectralComponent> {
        self.components.iter().find(|c| c.is_dc())
    }
}

/// Signed frequency label for bin `index` of an `len`-point transform.
///
/// `index` for `index <= len / 2`, `index - len` above; for even `len` the Nyquist bin stays
/// positive.
pub fn frequency_for_index(index: usize, len: usize) -> i64 {
    if index <= len / 2 {
        index as i64
    } else {
        index as i64 - len as i64
    }
}

/// Normalized forward DFT: `c[k] = (1/M) Σ p[n] e^{-2πi k n / M}`.
///
/// No windowing: the outline is periodic.
#[tracing::instrument(skip(points), fields(len = points.len()))]
pub fn decompose(points: &PointSequence) -> EpicycleResult<Spectrum> {
    let len = points.len();
    if len == 0 {
        return Err(EpicycleError::empty_input(
            Stage::Decomposition,
            "cannot transform an empty point sequence",
        ));
    }

    let mut buffer = points.as_slice().to_vec();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(len);
    fft.process(&mut buffer);

    let inv_len = 1.0 / len as f64;
    let components = buffer
        .into_iter()
        .enumerate()
        .map(|(index, c)| SpectralComponent {
            index,
            frequency: frequency_for_index(index, len),
            coefficient: c * inv_len,
        })
        .collect();
    Ok(Spectrum { components })
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/spectrum.rs"]
mod tests;
