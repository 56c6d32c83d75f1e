//! Run configuration: sampling density, selection policy, time sweep, output rate and style.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid configuration.
//! [`EpicycleConfig::validate`] runs before any numeric work.

use std::f64::consts::TAU;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::fourier::sampler::SamplerParams;
use crate::fourier::select::SelectionPolicy;
use crate::render::style::RenderStyle;

/// Time values handed to the epicycle evaluator, one per frame.
///
/// `t_j = start + j · (end - start) / frame_count` for `j in 0..frame_count`; `end` itself is
/// not sampled, so a sweep over whole periods loops seamlessly. The default covers two periods
/// (`0..4π`): the second period retraces the first.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeSweep {
    /// First time value.
    pub start: f64,
    /// Exclusive end of the sweep.
    pub end: f64,
    /// Number of frames.
    pub frame_count: u32,
}

impl Default for TimeSweep {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 2.0 * TAU,
            frame_count: 200,
        }
    }
}

impl TimeSweep {
    /// Check bounds are finite, ordered, and that at least one frame is requested.
    pub fn validate(&self) -> EpicycleResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(EpicycleError::invalid_config(format!(
                "time_sweep bounds must be finite, got {}..{}",
                self.start, self.end
            )));
        }
        if self.end <= self.start {
            return Err(EpicycleError::invalid_config(format!(
                "time_sweep end must be > start, got {}..{}",
                self.start, self.end
            )));
        }
        if self.frame_count == 0 {
            return Err(EpicycleError::invalid_config(
                "time_sweep frame_count must be >= 1",
            ));
        }
        Ok(())
    }

    /// Time step between consecutive frames.
    pub fn step(&self) -> f64 {
        (self.end - self.start) / f64::from(self.frame_count.max(1))
    }

    /// Time value of `frame`.
    pub fn time_at(&self, frame: FrameIndex) -> f64 {
        self.start + frame.0 as f64 * self.step()
    }

    /// All time values in frame order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..u64::from(self.frame_count)).map(|f| self.time_at(FrameIndex(f)))
    }
}

/// Full configuration of one run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EpicycleConfig {
    /// Coarse samples per segment for length estimation.
    pub base_sample_count: usize,
    /// Target arc-length spacing of retained points; smaller is denser.
    pub rate: f64,
    /// Which spectral components become epicycles.
    pub selection: SelectionPolicy,
    /// Frame time values.
    pub time_sweep: TimeSweep,
    /// Output frame rate.
    pub frames_per_second: u32,
    /// Rasterization style.
    pub style: RenderStyle,
}

impl Default for EpicycleConfig {
    fn default() -> Self {
        Self {
            base_sample_count: 20,
            rate: 1.0,
            selection: SelectionPolicy::default(),
            time_sweep: TimeSweep::default(),
            frames_per_second: 20,
            style: RenderStyle::default(),
        }
    }
}

impl EpicycleConfig {
    /// Read a JSON configuration file.
    pub fn from_json_file(path: &Path) -> EpicycleResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .map_err(|e| EpicycleError::invalid_config(format!("config '{}': {e}", path.display())))?;
        Ok(cfg)
    }

    /// Parse a JSON configuration string.
    pub fn from_json_str(s: &str) -> EpicycleResult<Self> {
        serde_json::from_str(s).map_err(|e| EpicycleError::invalid_config(format!("config: {e}")))
    }

    /// Sampler parameters carried by this configuration.
    pub fn sampler_params(&self) -> SamplerParams {
        SamplerParams {
            base_sample_count: self.base_sample_count,
            rate: self.rate,
        }
    }

    /// Output frame rate as [`Fps`].
    pub fn fps(&self) -> EpicycleResult<Fps> {
        Fps::new(self.frames_per_second, 1)
    }

    /// Spectrum-independent validation of every field.
    ///
    /// The `count <= M` bound of `top_n` needs the spectrum and is checked at selection time.
    pub fn validate(&self) -> EpicycleResult<()> {
        self.sampler_params().validate()?;
        self.selection.validate()?;
        self.time_sweep.validate()?;
        self.fps()?;
        self.style.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
