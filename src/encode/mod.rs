/// Scoped ownership of the output file.
pub mod artifact;
/// MP4 output through the system `ffmpeg` binary.
pub mod ffmpeg;
/// Animated GIF output through `image`.
pub mod gif;
/// Frame sink contract and the in-memory sink.
pub mod sink;

use std::path::Path;

use crate::foundation::error::{EpicycleError, EpicycleResult};

pub use artifact::ArtifactGuard;
pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use gif::{GifSink, GifSinkOpts};
pub use sink::{FrameSink, InMemorySink, SinkConfig};

/// Output formats selected from the artifact extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Looping animated GIF.
    Gif,
    /// H.264 MP4 written by `ffmpeg`.
    Mp4,
}

impl ArtifactKind {
    /// Classify `path` by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> EpicycleResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("gif") => Ok(Self::Gif),
            Some("mp4") => Ok(Self::Mp4),
            _ => Err(EpicycleError::invalid_config(format!(
                "unsupported output '{}': expected a .gif or .mp4 extension",
                path.display()
            ))),
        }
    }
}

/// Build the sink matching the extension of `path`.
///
/// `bg_rgba` is the color premultiplied frames are flattened over.
pub fn sink_for_path(path: &Path, bg_rgba: [u8; 4]) -> EpicycleResult<Box<dyn FrameSink>> {
    Ok(match ArtifactKind::from_path(path)? {
        ArtifactKind::Gif => Box::new(GifSink::new(GifSinkOpts {
            out_path: path.to_path_buf(),
            bg_rgba,
        })),
        ArtifactKind::Mp4 => Box::new(FfmpegSink::new(FfmpegSinkOpts {
            out_path: path.to_path_buf(),
            bg_rgba,
        })),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
