use super::*;
use kurbo::{CubicBez, Point};

fn line(a: (f64, f64), b: (f64, f64)) -> CubicBez {
    let p0 = Point::new(a.0, a.1);
    let p3 = Point::new(b.0, b.1);
    CubicBez::new(p0, p0.lerp(p3, 1.0 / 3.0), p0.lerp(p3, 2.0 / 3.0), p3)
}

fn square(side: f64) -> Vec<CubicBez> {
    vec![
        line((0.0, 0.0), (side, 0.0)),
        line((side, 0.0), (side, side)),
        line((side, side), (0.0, side)),
        line((0.0, side), (0.0, 0.0)),
    ]
}

#[test]
fn estimate_length_of_straight_cubic_is_exact() {
    let seg = line((0.0, 0.0), (3.0, 4.0));
    assert!((estimate_length(&seg, 20) - 5.0).abs() < 1e-9);
}

#[test]
fn target_count_floors_and_guards() {
    assert_eq!(target_count(0.0, 1.0), 1);
    assert_eq!(target_count(0.99, 1.0), 1);
    assert_eq!(target_count(1.0, 1.0), 2);
    assert_eq!(target_count(10.5, 0.5), 22);
    assert_eq!(target_count(f64::NAN, 1.0), 1);
}

#[test]
fn unit_square_samples_without_large_jumps() {
    let segs = square(1.0);
    let points = sample_segments(&segs, SamplerParams::default()).unwrap();
    assert!(points.len() > 4);
    assert_eq!(points.as_slice()[0], Complex64::new(0.0, 0.0));

    // Consecutive samples (including the implicit wrap) never jump further than a side.
    let pts = points.as_slice();
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        assert!((b - a).norm() <= 1.0 + 1e-9, "jump at {i}: {a} -> {b}");
    }
}

#[test]
fn shared_vertices_are_not_duplicated() {
    let segs = square(10.0);
    let points = sample_segments(&segs, SamplerParams::default()).unwrap();
    let pts = points.as_slice();
    for w in pts.windows(2) {
        assert!((w[1] - w[0]).norm() > 1e-9);
    }
    // No explicit closing duplicate of the first point.
    assert!((pts[pts.len() - 1] - pts[0]).norm() > 1e-9);
    assert_eq!(pts.len(), 4 * 11);
}

#[test]
fn length_is_monotone_as_rate_decreases() {
    let segs = vec![
        CubicBez::new((0.0, 0.0), (30.0, 80.0), (70.0, -40.0), (100.0, 20.0)),
        CubicBez::new((100.0, 20.0), (90.0, 60.0), (10.0, 60.0), (0.0, 0.0)),
    ];
    let mut prev = 0;
    for rate in [8.0, 4.0, 2.0, 1.0, 0.5, 0.25] {
        let params = SamplerParams {
            base_sample_count: 20,
            rate,
        };
        let n = sample_segments(&segs, params).unwrap().len();
        assert!(n >= prev, "rate {rate}: {n} < {prev}");
        prev = n;
    }
}

#[test]
fn degenerate_segment_still_yields_one_point() {
    let p = Point::new(5.0, 5.0);
    let segs = vec![CubicBez::new(p, p, p, p)];
    let points = sample_segments(&segs, SamplerParams::default()).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points.as_slice()[0], Complex64::new(5.0, 5.0));
}

#[test]
fn empty_segments_are_rejected() {
    let segs: Vec<CubicBez> = Vec::new();
    let err = sample_segments(&segs, SamplerParams::default()).unwrap_err();
    assert!(matches!(
        err,
        EpicycleError::EmptyInput {
            stage: Stage::Sampling,
            ..
        }
    ));
}

#[test]
fn bad_params_are_rejected_before_sampling() {
    let segs = square(1.0);
    for params in [
        SamplerParams {
            base_sample_count: 1,
            rate: 1.0,
        },
        SamplerParams {
            base_sample_count: 20,
            rate: 0.0,
        },
        SamplerParams {
            base_sample_count: 20,
            rate: -1.0,
        },
        SamplerParams {
            base_sample_count: 20,
            rate: f64::INFINITY,
        },
    ] {
        assert!(matches!(
            sample_segments(&segs, params),
            Err(EpicycleError::InvalidConfiguration(_))
        ));
    }
}
