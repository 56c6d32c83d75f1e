//! Numeric core: curve sampling, normalization, spectral decomposition, component selection
//! and epicycle evaluation.
//!
//! Each stage consumes the previous stage's output and nothing else:
//! segments → [`PointSequence`] → normalized [`PointSequence`] → [`Spectrum`] →
//! [`Selection`] → [`EpicycleFrame`].

/// Epicycle chain evaluation.
pub mod epicycle;
/// Centroid / unit-extent / axis-flip normalization.
pub mod normalize;
/// Arc-length-aware curve sampling.
pub mod sampler;
/// Parametric curve capability consumed by the sampler.
pub mod segment;
/// Magnitude-ranked component selection.
pub mod select;
/// Normalized discrete Fourier transform.
pub mod spectrum;

pub use epicycle::{EpicycleFrame, evaluate_chain, evaluate_tip};
pub use normalize::normalize;
pub use sampler::{PointSequence, SamplerParams, sample_segments};
pub use segment::CurveSegment;
pub use select::{Selection, SelectionPolicy, select};
pub use spectrum::{SpectralComponent, Spectrum, decompose};
