//! End-to-end entry points: outline → [`EpicycleModel`] → artifact.

use std::path::Path;

use crate::animate::{RenderStats, RenderThreading, render_animation};
use crate::assets::outline::{Outline, concat_segments};
use crate::config::EpicycleConfig;
use crate::encode::sink_for_path;
use crate::foundation::error::EpicycleResult;
use crate::fourier::normalize::normalize;
use crate::fourier::sampler::{PointSequence, sample_segments};
use crate::fourier::segment::CurveSegment;
use crate::fourier::select::{Selection, select};
use crate::fourier::spectrum::{Spectrum, decompose};

/// Every intermediate of the numeric pipeline for one outline.
#[derive(Clone, Debug)]
pub struct EpicycleModel {
    /// Normalized samples (centered, unit extent, `y` up).
    pub points: PointSequence,
    /// Full spectrum of `points`.
    pub spectrum: Spectrum,
    /// Components kept for rendering.
    pub selection: Selection,
}

/// Run sampling, normalization, decomposition and selection over `segments`.
///
/// The whole configuration is validated first, so a bad value fails before any numeric work.
#[tracing::instrument(skip_all, fields(segments = segments.len()))]
pub fn build_epicycles<S: CurveSegment>(
    segments: &[S],
    cfg: &EpicycleConfig,
) -> EpicycleResult<EpicycleModel> {
    cfg.validate()?;
    let sampled = sample_segments(segments, cfg.sampler_params())?;
    let points = normalize(&sampled)?;
    let spectrum = decompose(&points)?;
    let selection = select(&spectrum, cfg.selection)?;
    tracing::debug!(
        points = points.len(),
        components = selection.len(),
        "built epicycle model"
    );
    Ok(EpicycleModel {
        points,
        spectrum,
        selection,
    })
}

/// [`build_epicycles`] over the concatenation of `outlines` in document order.
pub fn build_from_outlines(
    outlines: &[Outline],
    cfg: &EpicycleConfig,
) -> EpicycleResult<EpicycleModel> {
    build_epicycles(&concat_segments(outlines), cfg)
}

/// Render `model` into `out`, picking the encoder from the file extension.
pub fn render_to_file(
    model: &EpicycleModel,
    cfg: &EpicycleConfig,
    threading: &RenderThreading,
    out: &Path,
) -> EpicycleResult<RenderStats> {
    let mut sink = sink_for_path(out, cfg.style.background)?;
    render_animation(&model.selection, cfg, threading, sink.as_mut())
}
