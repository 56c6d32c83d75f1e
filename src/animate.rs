//! Animation driver: sweeps time, accumulates the trace and hands rasterized frames to a sink.

use rayon::prelude::*;

use crate::config::{EpicycleConfig, TimeSweep};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Complex64, FrameIndex};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::fourier::epicycle::EpicycleFrame;
use crate::fourier::select::Selection;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::render::scene::{FrameScene, ViewTransform};
use crate::render::style::RenderStyle;

/// Threading and chunking controls for multi-frame rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Counters reported by [`render_animation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Rotating components per frame.
    pub components: usize,
}

/// Points traced so far, oldest first.
///
/// Owned by the driver; the evaluator never sees it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraceHistory {
    points: Vec<Complex64>,
}

impl TraceHistory {
    /// Empty history with room for `cap` points.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            points: Vec::with_capacity(cap),
        }
    }

    /// Append the next traced point.
    pub fn push(&mut self, p: Complex64) {
        self.points.push(p);
    }

    /// Number of traced points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` before the first frame.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Borrow the trace in time order.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.points
    }
}

/// Evaluate the chain at every time value of `sweep`, in time order.
pub fn evaluate_sweep(
    selection: &Selection,
    sweep: &TimeSweep,
    parallel: bool,
) -> Vec<EpicycleFrame> {
    let n = sweep.frame_count as usize;
    let at = |f: usize| selection.evaluate(sweep.time_at(FrameIndex(f as u64)));
    if parallel {
        (0..n).into_par_iter().map(at).collect()
    } else {
        (0..n).map(at).collect()
    }
}

/// Full trace of `sweep` without chain geometry.
pub fn trace_sweep(selection: &Selection, sweep: &TimeSweep) -> TraceHistory {
    let mut trace = TraceHistory::with_capacity(sweep.frame_count as usize);
    for t in sweep.times() {
        trace.push(selection.tip(t));
    }
    trace
}

/// Render every frame of `cfg.time_sweep` into `sink`.
///
/// The sink sees `begin`, every frame in order, then `end`. On any failure it sees `abort`
/// instead of `end` and the error is returned.
#[tracing::instrument(
    skip_all,
    fields(
        components = selection.len(),
        frames = cfg.time_sweep.frame_count,
        parallel = threading.parallel
    )
)]
pub fn render_animation(
    selection: &Selection,
    cfg: &EpicycleConfig,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> EpicycleResult<RenderStats> {
    cfg.validate()?;
    let sink_cfg = SinkConfig {
        width: cfg.style.canvas.width,
        height: cfg.style.canvas.height,
        fps: cfg.fps()?,
    };
    sink.begin(sink_cfg)?;

    let result = if threading.parallel {
        drive_parallel(selection, cfg, threading, sink)
    } else {
        drive_sequential(selection, cfg, sink)
    };

    match result {
        Ok(frames) => {
            sink.end()?;
            tracing::debug!(frames, "animation complete");
            Ok(RenderStats {
                frames,
                components: selection.len(),
            })
        }
        Err(e) => {
            tracing::debug!(error = %e, "aborting sink");
            sink.abort();
            Err(e)
        }
    }
}

fn drive_sequential(
    selection: &Selection,
    cfg: &EpicycleConfig,
    sink: &mut dyn FrameSink,
) -> EpicycleResult<u64> {
    let style = &cfg.style;
    let view = ViewTransform::fit(style.canvas, style.margin);
    let mut backend = CpuBackend::new(style)?;
    let mut trace = TraceHistory::with_capacity(cfg.time_sweep.frame_count as usize);

    let mut pushed = 0;
    for (f, t) in cfg.time_sweep.times().enumerate() {
        let frame = selection.evaluate(t);
        trace.push(frame.tip());
        let image = render_one(&mut backend, &frame, trace.as_slice(), &view, style)?;
        sink.push_frame(FrameIndex(f as u64), &image)?;
        pushed += 1;
    }
    Ok(pushed)
}

fn drive_parallel(
    selection: &Selection,
    cfg: &EpicycleConfig,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> EpicycleResult<u64> {
    let style = &cfg.style;
    let sweep = &cfg.time_sweep;
    let view = ViewTransform::fit(style.canvas, style.margin);
    let pool = build_thread_pool(threading.threads)?;
    let trace = trace_sweep(selection, sweep);
    let total = sweep.frame_count as usize;
    let chunk_size = threading.chunk_size.max(1);

    let mut chunk_start = 0;
    while chunk_start < total {
        let chunk_end = (chunk_start + chunk_size).min(total);
        let rendered = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .map_init(
                    || CpuBackend::new(style),
                    |backend, f| -> EpicycleResult<FrameRGBA> {
                        let backend = backend.as_mut().map_err(|e| {
                            EpicycleError::render(format!("worker backend: {e}"))
                        })?;
                        let frame = selection.evaluate(sweep.time_at(FrameIndex(f as u64)));
                        let history = &trace.as_slice()[..=f];
                        render_one(backend, &frame, history, &view, style)
                    },
                )
                .collect::<Vec<_>>()
        });
        for (f, image) in (chunk_start..chunk_end).zip(rendered) {
            sink.push_frame(FrameIndex(f as u64), &image?)?;
        }
        chunk_start = chunk_end;
    }
    Ok(total as u64)
}

fn render_one(
    backend: &mut CpuBackend,
    frame: &EpicycleFrame,
    history: &[Complex64],
    view: &ViewTransform,
    style: &RenderStyle,
) -> EpicycleResult<FrameRGBA> {
    let scene = FrameScene::build(frame, history, view, style);
    backend.render_scene(&scene)
}

fn build_thread_pool(threads: Option<usize>) -> EpicycleResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(EpicycleError::invalid_config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| EpicycleError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/animate.rs"]
mod tests;
