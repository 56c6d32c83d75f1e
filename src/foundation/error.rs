use std::fmt;
use std::path::{Path, PathBuf};

/// Crate-wide result alias.
pub type EpicycleResult<T> = Result<T, EpicycleError>;

/// Pipeline stage an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading SVG documents or path data.
    Loading,
    /// Curve sampling.
    Sampling,
    /// Centering, rescaling and axis flip.
    Normalization,
    /// Discrete Fourier transform.
    Decomposition,
    /// Component selection.
    Selection,
    /// Rasterization of frame geometry.
    Render,
    /// Frame encoding into the output artifact.
    Encode,
}

impl Stage {
    /// Stable lowercase name used in error messages and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Loading => "loading",
            Stage::Sampling => "sampling",
            Stage::Normalization => "normalization",
            Stage::Decomposition => "decomposition",
            Stage::Selection => "selection",
            Stage::Render => "render",
            Stage::Encode => "encode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the epicycle pipeline and its collaborators.
///
/// Every variant is fatal for the current run; nothing in the crate retries.
#[derive(thiserror::Error, Debug)]
pub enum EpicycleError {
    /// No segments, or no points, reached a stage that needs at least one.
    #[error("empty input in {stage}: {detail}")]
    EmptyInput {
        /// Stage that observed the empty input.
        stage: Stage,
        /// Offending value or context.
        detail: String,
    },

    /// All sampled points coincide, so the outline cannot be rescaled.
    #[error("degenerate scale in {stage}: {detail}")]
    DegenerateScale {
        /// Stage that observed the degenerate scale.
        stage: Stage,
        /// Offending value or context.
        detail: String,
    },

    /// A configuration value is out of range. Raised before numeric work starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The output artifact could not be replaced or written.
    #[error("artifact write error for '{}': {detail}", path.display())]
    ArtifactWrite {
        /// Target artifact path.
        path: PathBuf,
        /// Underlying failure.
        detail: String,
    },

    /// SVG or path data could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Rasterization or encoder failure.
    #[error("{stage} error: {detail}")]
    Render {
        /// Either [`Stage::Render`] or [`Stage::Encode`].
        stage: Stage,
        /// Underlying failure.
        detail: String,
    },

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EpicycleError {
    /// Build an [`EpicycleError::EmptyInput`].
    pub fn empty_input(stage: Stage, detail: impl Into<String>) -> Self {
        Self::EmptyInput {
            stage,
            detail: detail.into(),
        }
    }

    /// Build an [`EpicycleError::DegenerateScale`].
    pub fn degenerate_scale(stage: Stage, detail: impl Into<String>) -> Self {
        Self::DegenerateScale {
            stage,
            detail: detail.into(),
        }
    }

    /// Build an [`EpicycleError::InvalidConfiguration`].
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build an [`EpicycleError::ArtifactWrite`].
    pub fn artifact_write(path: &Path, detail: impl Into<String>) -> Self {
        Self::ArtifactWrite {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// Build an [`EpicycleError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`Stage::Render`] error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            stage: Stage::Render,
            detail: msg.into(),
        }
    }

    /// Build a [`Stage::Encode`] error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Render {
            stage: Stage::Encode,
            detail: msg.into(),
        }
    }

    /// Stage the error is attributed to, when it carries one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::EmptyInput { stage, .. }
            | Self::DegenerateScale { stage, .. }
            | Self::Render { stage, .. } => Some(*stage),
            Self::Parse(_) => Some(Stage::Loading),
            Self::ArtifactWrite { .. } => Some(Stage::Encode),
            Self::InvalidConfiguration(_) | Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
