//! Fourier epicycle animations from SVG outlines.
//!
//! An outline (SVG document or raw path data) is sampled into evenly spaced complex points,
//! normalized, decomposed with a DFT and reduced to its most significant rotating components.
//! The chain of those components is then evaluated over a time sweep and rasterized into an
//! animated GIF or an MP4.
//!
//! - Load outlines with [`load_svg_file`] or [`parse_path_data`]
//! - Build an [`EpicycleModel`] with [`build_epicycles`]
//! - Render it with [`render_to_file`] or stream frames into any [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Animation driver.
pub mod animate;
/// Outline loading.
pub mod assets;
/// Run configuration.
pub mod config;
/// Frame sinks and artifact handling.
pub mod encode;
/// Numeric core.
pub mod fourier;
/// End-to-end entry points.
pub mod pipeline;
/// CPU rasterization of epicycle frames.
pub mod render;

pub use crate::foundation::core::{
    BezPath, Canvas, Complex64, CubicBez, Fps, FrameIndex, Point, to_complex, to_point,
};
pub use crate::foundation::error::{EpicycleError, EpicycleResult, Stage};

pub use crate::animate::{RenderStats, RenderThreading, TraceHistory, render_animation};
pub use crate::assets::outline::{Outline, concat_segments, parse_path_data};
pub use crate::assets::svg::{load_svg_file, parse_svg};
pub use crate::config::{EpicycleConfig, TimeSweep};
pub use crate::encode::{FfmpegSink, FrameSink, GifSink, InMemorySink, SinkConfig, sink_for_path};
pub use crate::fourier::{
    CurveSegment, EpicycleFrame, PointSequence, Selection, SelectionPolicy, SpectralComponent,
    Spectrum,
};
pub use crate::pipeline::{EpicycleModel, build_epicycles, build_from_outlines, render_to_file};
pub use crate::render::{CpuBackend, FrameRGBA, RenderStyle};
