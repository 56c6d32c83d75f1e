use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::fourier::spectrum::SpectralComponent;

fn selection() -> Selection {
    Selection {
        base_offset: Complex64::new(0.05, -0.02),
        components: vec![
            SpectralComponent {
                index: 1,
                frequency: 1,
                coefficient: Complex64::new(0.6, 0.1),
            },
            SpectralComponent {
                index: 9,
                frequency: -1,
                coefficient: Complex64::new(0.0, 0.25),
            },
            SpectralComponent {
                index: 3,
                frequency: 3,
                coefficient: Complex64::new(0.1, 0.0),
            },
        ],
    }
}

fn small_cfg(frame_count: u32) -> EpicycleConfig {
    let mut cfg = EpicycleConfig::default();
    cfg.time_sweep.frame_count = frame_count;
    cfg.style.canvas = Canvas {
        width: 40,
        height: 32,
    };
    cfg
}

#[test]
fn sequential_render_pushes_every_frame() {
    let cfg = small_cfg(6);
    let mut sink = InMemorySink::new();
    let stats = render_animation(&selection(), &cfg, &RenderThreading::default(), &mut sink)
        .unwrap();
    assert_eq!(stats.frames, 6);
    assert_eq!(stats.components, 3);
    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), 6);
    let c = sink.config().unwrap();
    assert_eq!((c.width, c.height, c.fps.num), (40, 32, 20));
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.data.len(), 40 * 32 * 4);
    }
}

#[test]
fn parallel_and_sequential_frames_match() {
    let cfg = small_cfg(9);
    let mut seq = InMemorySink::new();
    render_animation(&selection(), &cfg, &RenderThreading::default(), &mut seq).unwrap();

    let threading = RenderThreading {
        parallel: true,
        chunk_size: 4,
        threads: Some(3),
    };
    let mut par = InMemorySink::new();
    render_animation(&selection(), &cfg, &threading, &mut par).unwrap();

    assert_eq!(seq.frames(), par.frames());
}

#[test]
fn sweep_evaluation_is_ordered_and_matches_trace() {
    let sweep = TimeSweep {
        start: 0.0,
        end: 1.0,
        frame_count: 17,
    };
    let sel = selection();
    let seq = evaluate_sweep(&sel, &sweep, false);
    let par = evaluate_sweep(&sel, &sweep, true);
    assert_eq!(seq, par);

    let trace = trace_sweep(&sel, &sweep);
    assert_eq!(trace.len(), 17);
    for (frame, tip) in seq.iter().zip(trace.as_slice()) {
        assert_eq!(frame.tip(), *tip);
    }
    assert_eq!(seq[4].t, sweep.time_at(FrameIndex(4)));
}

struct FailingSink {
    fail_at: u64,
    pushed: u64,
    aborted: bool,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> EpicycleResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> EpicycleResult<()> {
        if idx.0 == self.fail_at {
            return Err(EpicycleError::encode("disk full"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> EpicycleResult<()> {
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[test]
fn sink_failure_aborts_instead_of_ending() {
    for parallel in [false, true] {
        let mut sink = FailingSink {
            fail_at: 2,
            pushed: 0,
            aborted: false,
            ended: false,
        };
        let threading = RenderThreading {
            parallel,
            ..RenderThreading::default()
        };
        let err = render_animation(&selection(), &small_cfg(5), &threading, &mut sink).unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(sink.aborted);
        assert!(!sink.ended);
        assert_eq!(sink.pushed, 2);
    }
}

#[test]
fn invalid_config_never_reaches_the_sink() {
    let mut cfg = small_cfg(3);
    cfg.frames_per_second = 0;
    let mut sink = InMemorySink::new();
    assert!(matches!(
        render_animation(&selection(), &cfg, &RenderThreading::default(), &mut sink),
        Err(EpicycleError::InvalidConfiguration(_))
    ));
    assert!(sink.config().is_none());
}

#[test]
fn zero_threads_is_rejected() {
    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    let mut sink = InMemorySink::new();
    assert!(matches!(
        render_animation(&selection(), &small_cfg(2), &threading, &mut sink),
        Err(EpicycleError::InvalidConfiguration(_))
    ));
}
