use super::*;
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

fn out_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_gif_sink");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: rgba.repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn sink(path: &std::path::Path) -> GifSink {
    GifSink::new(GifSinkOpts {
        out_path: path.to_path_buf(),
        bg_rgba: [0, 0, 0, 255],
    })
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 6,
        fps: Fps::new(20, 1).unwrap(),
    }
}

#[test]
fn writes_decodable_animation_over_stale_file() {
    let path = out_path("anim.gif");
    std::fs::write(&path, b"stale").unwrap();

    let mut s = sink(&path);
    s.begin(cfg()).unwrap();
    for (i, c) in [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]
        .into_iter()
        .enumerate()
    {
        s.push_frame(FrameIndex(i as u64), &solid(8, 6, c)).unwrap();
    }
    s.end().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    let decoder = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (8, 6));
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 50);
}

#[test]
fn abort_discards_partial_file() {
    let path = out_path("aborted.gif");
    let mut s = sink(&path);
    s.begin(cfg()).unwrap();
    s.push_frame(FrameIndex(0), &solid(8, 6, [9, 9, 9, 255]))
        .unwrap();
    s.abort();
    assert!(!path.exists());
}

#[test]
fn size_mismatch_is_an_error() {
    let path = out_path("mismatch.gif");
    let mut s = sink(&path);
    s.begin(cfg()).unwrap();
    assert!(s.push_frame(FrameIndex(0), &solid(4, 4, [0; 4])).is_err());
    s.abort();
}

#[test]
fn delay_follows_fps() {
    let (num, den) = frame_delay(Fps::new(25, 1).unwrap()).numer_denom_ms();
    assert_eq!(num / den, 40);
}

/// File writer whose writes start failing once `broken` is set, and whose flush can be made to
/// fail independently.
struct FlakyFile {
    file: std::fs::File,
    broken: std::sync::Arc<std::sync::atomic::AtomicBool>,
    fail_flush: bool,
}

impl Write for FlakyFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.broken.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(std::io::Error::other("disk full"));
        }
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.fail_flush {
            return Err(std::io::Error::other("flush refused"));
        }
        self.file.flush()
    }
}

fn start_flaky(
    path: &std::path::Path,
    fail_flush: bool,
) -> (GifSink, std::sync::Arc<std::sync::atomic::AtomicBool>) {
    let broken = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let artifact = ArtifactGuard::prepare(path).unwrap();
    let file = std::fs::File::create(artifact.path()).unwrap();
    let out = FlakyFile {
        file,
        broken: broken.clone(),
        fail_flush,
    };
    let mut s = sink(path);
    s.start(cfg(), artifact, Box::new(out)).unwrap();
    (s, broken)
}

#[test]
fn failed_trailer_write_is_reported_and_file_removed() {
    let path = out_path("trailer_fails.gif");
    let (mut s, broken) = start_flaky(&path, false);
    s.push_frame(FrameIndex(0), &solid(8, 6, [200, 10, 10, 255]))
        .unwrap();
    s.push_frame(FrameIndex(1), &solid(8, 6, [10, 200, 10, 255]))
        .unwrap();
    assert!(path.exists());

    broken.store(true, std::sync::atomic::Ordering::SeqCst);
    let err = s.end().unwrap_err();
    assert!(matches!(err, EpicycleError::ArtifactWrite { .. }), "{err}");
    assert!(err.to_string().contains("disk full"), "{err}");
    assert!(!path.exists());
}

#[test]
fn failed_flush_is_reported_and_file_removed() {
    let path = out_path("flush_fails.gif");
    let (mut s, _broken) = start_flaky(&path, true);
    s.push_frame(FrameIndex(0), &solid(8, 6, [0, 0, 0, 255]))
        .unwrap();
    let err = s.end().unwrap_err();
    assert!(matches!(err, EpicycleError::ArtifactWrite { .. }), "{err}");
    assert!(!path.exists());
}
