use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::artifact::ArtifactGuard;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame, flatten_to_opaque_rgba8};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::render::backend::FrameRGBA;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Background color used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

/// Byte stream shared between the encoder and the sink.
///
/// The encoder writes its trailer from `Drop`, where errors are lost. Every write goes through
/// here so the first failure is remembered and reported by [`GifSink::end`].
#[derive(Clone)]
struct TrackedWriter(Arc<Mutex<TrackedState>>);

struct TrackedState {
    out: Box<dyn Write + Send>,
    error: Option<String>,
}

impl TrackedWriter {
    fn new(out: Box<dyn Write + Send>) -> Self {
        Self(Arc::new(Mutex::new(TrackedState { out, error: None })))
    }

    /// Flush the underlying stream and surface the first recorded failure.
    fn finish(&self) -> Result<(), String> {
        let mut state = self
            .0
            .lock()
            .map_err(|_| "gif writer lock poisoned".to_string())?;
        if let Some(err) = state.error.take() {
            return Err(err);
        }
        state.out.flush().map_err(|e| format!("flush: {e}"))
    }
}

impl Write for TrackedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut state = self
            .0
            .lock()
            .map_err(|_| std::io::Error::other("gif writer lock poisoned"))?;
        let res = state.out.write(buf);
        if let Err(e) = &res
            && state.error.is_none()
        {
            state.error = Some(format!("write: {e}"));
        }
        res
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut state = self
            .0
            .lock()
            .map_err(|_| std::io::Error::other("gif writer lock poisoned"))?;
        let res = state.out.flush();
        if let Err(e) = &res
            && state.error.is_none()
        {
            state.error = Some(format!("flush: {e}"));
        }
        res
    }
}

/// Sink writing an infinitely looping animated GIF.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<TrackedWriter>>,
    stream: Option<TrackedWriter>,
    artifact: Option<ArtifactGuard>,
    delay: Delay,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    /// Create a sink that will write `opts.out_path` once started.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            stream: None,
            artifact: None,
            delay: Delay::from_numer_denom_ms(50, 1),
            cfg: None,
            last_idx: None,
        }
    }
}

impl GifSink {
    /// Begin encoding into `out`; `artifact` owns the file `out` writes to.
    pub(crate) fn start(
        &mut self,
        cfg: SinkConfig,
        artifact: ArtifactGuard,
        out: Box<dyn Write + Send>,
    ) -> EpicycleResult<()> {
        let stream = TrackedWriter::new(out);
        let mut encoder = GifEncoder::new(stream.clone());
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| EpicycleError::artifact_write(artifact.path(), format!("gif repeat: {e}")))?;

        self.delay = frame_delay(cfg.fps);
        self.encoder = Some(encoder);
        self.stream = Some(stream);
        self.artifact = Some(artifact);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }
}

/// Per-frame delay for `fps`.
pub fn frame_delay(fps: Fps) -> Delay {
    Delay::from_numer_denom_ms(1000 * fps.den, fps.num.max(1))
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> EpicycleResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(EpicycleError::invalid_config(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(EpicycleError::invalid_config(format!(
                "gif frames are limited to {0}x{0}",
                u16::MAX
            )));
        }

        let artifact = ArtifactGuard::prepare(&self.opts.out_path)?;
        let file = File::create(artifact.path()).map_err(|e| {
            EpicycleError::artifact_write(artifact.path(), format!("failed to create file: {e}"))
        })?;
        self.start(cfg, artifact, Box::new(BufWriter::new(file)))
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EpicycleResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| EpicycleError::encode("gif sink not started"))?;
        check_frame(cfg, self.last_idx, idx, frame)?;
        self.last_idx = Some(idx);

        let mut rgba = vec![0u8; frame.data.len()];
        flatten_to_opaque_rgba8(&mut rgba, &frame.data, frame.premultiplied, self.opts.bg_rgba)?;
        let buffer = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| EpicycleError::encode("frame buffer does not match its dimensions"))?;

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(EpicycleError::encode("gif sink is already finalized"));
        };
        encoder
            .encode_frame(Frame::from_parts(buffer, 0, 0, self.delay))
            .map_err(|e| {
                let path = self.opts.out_path.as_path();
                EpicycleError::artifact_write(path, format!("gif frame {}: {e}", idx.0))
            })
    }

    fn end(&mut self) -> EpicycleResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| EpicycleError::encode("gif sink not started"))?;
        // The trailer is written when the encoder is dropped.
        drop(encoder);
        self.cfg = None;
        let finished = self.stream.take().map_or(Ok(()), |stream| stream.finish());
        let artifact = self
            .artifact
            .take()
            .ok_or_else(|| EpicycleError::encode("gif sink has no artifact"))?;
        // On failure `artifact` drops armed and removes the partial file.
        finished.map_err(|e| EpicycleError::artifact_write(artifact.path(), e))?;

        let frames = self.last_idx.map_or(0, |i| i.0 + 1);
        tracing::debug!(path = %artifact.path().display(), frames, "wrote gif");
        artifact.commit();
        Ok(())
    }

    fn abort(&mut self) {
        self.encoder = None;
        self.stream = None;
        self.artifact = None;
        self.cfg = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
